use std::sync::Arc;

use crate::config::Config;
use crate::notify::Notifier;
use crate::session::controller::SessionController;
use crate::session::{AnswerEvaluator, QuestionGenerator};
use crate::store::Store;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub generator: Arc<dyn QuestionGenerator>,
    pub evaluator: Arc<dyn AnswerEvaluator>,
    pub notifier: Arc<dyn Notifier>,
    pub sessions: SessionController,
    pub config: Config,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        generator: Arc<dyn QuestionGenerator>,
        evaluator: Arc<dyn AnswerEvaluator>,
        notifier: Arc<dyn Notifier>,
        config: Config,
    ) -> Self {
        let sessions = SessionController::new(
            Arc::clone(&store),
            Arc::clone(&generator),
            Arc::clone(&evaluator),
            Arc::clone(&notifier),
        );
        Self {
            store,
            generator,
            evaluator,
            notifier,
            sessions,
            config,
        }
    }
}

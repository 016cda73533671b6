//! HTML bodies for the three notification mails: interview completion,
//! retention export, and retention deletion confirmation.

use crate::models::interview::InterviewRow;

/// Completion confirmation sent to the candidate once evaluation finishes.
pub fn interview_completed(candidate_name: &str, interview: &InterviewRow) -> (String, String) {
    let job_title = interview.job_title_or_default();
    let company = interview.company_name_or_default();
    let subject = format!("Confirmation: {job_title} Interview Completed");
    let body = format!(
        r#"<html>
<body style="font-family: sans-serif; line-height: 1.6; color: #444;">
  <h1>Interview Confirmation</h1>
  <p>Dear {candidate_name},</p>
  <p>Thank you for completing your interview for the <strong>{job_title}</strong>
  position at <strong>{company}</strong>.</p>
  <p>Our team is reviewing all responses and will be in touch with an update
  on your application status.</p>
  <p>Kind regards,<br>The Parley Team</p>
</body>
</html>"#
    );
    (subject, body)
}

/// Export notice sent to an HR before their stale interviews are deleted.
/// The CSV rides along as an attachment.
pub fn retention_export(hr_email: &str, exported_rows: usize, retention_days: i64) -> (String, String) {
    let subject = "Parley | Old Interview Data Export & Deletion Notice".to_string();
    let body = format!(
        r#"<html>
<body style="font-family: sans-serif; line-height: 1.6; color: #444;">
  <h1>Interview Data Cleanup Notification</h1>
  <p>Dear {hr_email},</p>
  <p>Interview records older than <strong>{retention_days} days</strong> have been
  exported and are being deleted as part of our routine data retention policy.</p>
  <p><strong>Total records exported:</strong> {exported_rows}</p>
  <p>You can find the exported data attached to this email for your reference.</p>
  <p>Best regards,<br>The Parley Team</p>
</body>
</html>"#
    );
    (subject, body)
}

/// Confirmation sent after the stale interviews have been removed.
pub fn retention_deleted(hr_email: &str, deleted_interviews: usize) -> (String, String) {
    let subject = "Parley | Interview Data Deleted".to_string();
    let body = format!(
        r#"<html>
<body style="font-family: sans-serif; line-height: 1.6; color: #444;">
  <h1>Data Deletion Confirmation</h1>
  <p>Dear {hr_email},</p>
  <p>This confirms that <strong>{deleted_interviews}</strong> of your interviews have
  been permanently deleted from our system as part of the scheduled data
  cleanup process. No further action is required.</p>
  <p>Warm regards,<br>The Parley Team</p>
</body>
</html>"#
    );
    (subject, body)
}

//! Upload command implementation.

use crate::cli::UploadArgs;
use crate::client::{ApiClient, UploadRequest};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::prompt_form::PromptForm;
use crate::session::{Session, TaskItem};

/// Execute the upload command.
///
/// Files are uploaded one at a time; a failure for one file is reported
/// and the batch continues. Only accepted uploads become tracked tasks.
pub async fn execute_upload(
    args: UploadArgs,
    client: &ApiClient,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    let instruction = match (&args.prompt, &args.prompt_form) {
        (Some(prompt), _) => prompt.clone(),
        (None, Some(form_path)) => PromptForm::from_file(form_path)?.render(),
        (None, None) => {
            return Err(CliError::InvalidInput(
                "Provide an instruction with --prompt or --prompt-form".to_string(),
            ))
        }
    };

    let request = UploadRequest {
        instruction,
        model: args.model.clone(),
        temperature: args.temperature,
        organization: args.organization.into(),
        document_kind: args.kind.into(),
    };

    let mut accepted = 0usize;
    for path in &args.files {
        let name = path.display().to_string();
        match client.upload(path, &request).await {
            Ok(response) => {
                println!(
                    "{}",
                    formatter.success(&format!("{} -> task {}", name, response.task_id))
                );
                session.add_task(TaskItem::new(
                    response.task_id,
                    path.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or(name),
                ));
                accepted += 1;
            }
            Err(CliError::Timeout) => {
                println!(
                    "{}",
                    formatter.error(&format!(
                        "{}: upload timed out. The server may be busy; try again later.",
                        name
                    ))
                );
            }
            Err(e) => {
                println!("{}", formatter.error(&format!("{}: {}", name, e)));
            }
        }
    }

    println!(
        "{}",
        formatter.info(&format!(
            "{} of {} file(s) accepted",
            accepted,
            args.files.len()
        ))
    );
    Ok(())
}

//! Prompt command implementation.

use crate::cli::PromptArgs;
use crate::error::Result;
use crate::prompt_form::PromptForm;

/// Execute the prompt command: render the questionnaire and print the
/// instruction so the expert can inspect or edit it before uploading.
pub fn execute_prompt(args: PromptArgs) -> Result<()> {
    let form = PromptForm::from_file(&args.file)?;
    println!("{}", form.render());
    Ok(())
}

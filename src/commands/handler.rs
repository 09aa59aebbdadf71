use super::CommandContext;
use super::prompts::{ANSWER_SYSTEM_PROMPT, GENERATE_TRANSCRIPT_PROMPT, SUMMARIZE_SYSTEM_PROMPT};
use crate::core::error::SalesCallError;
use crate::display;
use crate::providers::{CompletionResult, Message};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &[String],
    ) -> Result<(), SalesCallError>;

    /// Rejects missing arguments before any configuration, file or network access.
    fn validate(&self, _args: &[String]) -> Result<(), SalesCallError> {
        Ok(())
    }

    fn help(&self) -> &'static str;
}

pub struct GenerateCommand;
pub struct SummarizeCommand;
pub struct AnswerCommand;

/// Where a completion goes once it comes back.
enum Emit<'a> {
    Print,
    SaveAndPrint(Option<&'a str>),
}

fn arg(args: &[String], index: usize) -> Option<&str> {
    args.get(index).map(String::as_str).filter(|a| !a.is_empty())
}

/// Places `file_name` under `output_dir` unless it is already there.
/// Without a name the completion id is used.
pub fn resolve_output_path(output_dir: &str, file_name: Option<&str>, id: &str) -> PathBuf {
    let prefix = format!("{}/", output_dir.trim_end_matches('/'));
    match file_name.filter(|name| !name.is_empty()) {
        Some(name) if name.starts_with(&prefix) => PathBuf::from(name),
        Some(name) => PathBuf::from(format!("{prefix}{name}")),
        None => PathBuf::from(format!("{prefix}{id}")),
    }
}

fn require_file_name(file_name: Option<&str>) -> Result<&str, SalesCallError> {
    file_name
        .filter(|f| !f.is_empty())
        .ok_or_else(|| SalesCallError::MissingArgument("file_name is required".to_string()))
}

fn require_file_and_query<'a>(
    file_name: Option<&'a str>,
    query: Option<&'a str>,
) -> Result<(&'a str, &'a str), SalesCallError> {
    match (
        file_name.filter(|f| !f.is_empty()),
        query.filter(|q| !q.is_empty()),
    ) {
        (Some(file_name), Some(query)) => Ok((file_name, query)),
        _ => Err(SalesCallError::MissingArgument(
            "file_name and query are required".to_string(),
        )),
    }
}

fn read_transcript(path: &str) -> Result<String, SalesCallError> {
    let content = fs::read_to_string(path)?;
    tracing::debug!(path, bytes = content.len(), "read transcript");
    Ok(content)
}

fn write_transcript(path: &Path, text: &str) -> Result<(), SalesCallError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, text)?;
    tracing::info!(path = %path.display(), "wrote transcript");
    Ok(())
}

async fn run_prompt(
    ctx: &mut CommandContext<'_>,
    prompt: Vec<Message>,
    emit: Emit<'_>,
) -> Result<CompletionResult, SalesCallError> {
    let response = ctx.gateway.complete(&prompt).await?;

    if let Emit::SaveAndPrint(file_name) = emit {
        let path = resolve_output_path(ctx.output_dir, file_name, &response.id);
        write_transcript(&path, &response.text)?;
    }
    display::print_response(&mut *ctx.out, &response.text)?;

    Ok(response)
}

/// Generates a fictional sales call transcript, saves it and prints it.
pub async fn generate_transcript(
    ctx: &mut CommandContext<'_>,
    file_name: Option<&str>,
) -> Result<CompletionResult, SalesCallError> {
    let prompt = vec![Message::user(GENERATE_TRANSCRIPT_PROMPT)];
    run_prompt(ctx, prompt, Emit::SaveAndPrint(file_name)).await
}

/// Prints a summary of the key points in a transcript file.
pub async fn summarize_transcript(
    ctx: &mut CommandContext<'_>,
    file_name: Option<&str>,
) -> Result<CompletionResult, SalesCallError> {
    let file_name = require_file_name(file_name)?;

    let transcript = read_transcript(file_name)?;
    let prompt = vec![
        Message::system(SUMMARIZE_SYSTEM_PROMPT),
        Message::user(transcript),
    ];
    run_prompt(ctx, prompt, Emit::Print).await
}

/// Prints the answer to a question about a transcript file.
pub async fn answer_query(
    ctx: &mut CommandContext<'_>,
    file_name: Option<&str>,
    query: Option<&str>,
) -> Result<CompletionResult, SalesCallError> {
    let (file_name, query) = require_file_and_query(file_name, query)?;

    let transcript = read_transcript(file_name)?;
    let prompt = vec![
        Message::system(ANSWER_SYSTEM_PROMPT),
        Message::user(transcript),
        Message::user(query),
    ];
    run_prompt(ctx, prompt, Emit::Print).await
}

#[async_trait]
impl CommandHandler for GenerateCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &[String],
    ) -> Result<(), SalesCallError> {
        generate_transcript(ctx, arg(args, 0)).await.map(|_| ())
    }

    fn help(&self) -> &'static str {
        "generate [output_file_name] - Generate a fictional sales call transcript"
    }
}

#[async_trait]
impl CommandHandler for SummarizeCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &[String],
    ) -> Result<(), SalesCallError> {
        summarize_transcript(ctx, arg(args, 0)).await.map(|_| ())
    }

    fn validate(&self, args: &[String]) -> Result<(), SalesCallError> {
        require_file_name(arg(args, 0)).map(|_| ())
    }

    fn help(&self) -> &'static str {
        "summarize <input_file_name> - Summarize the key points of a transcript"
    }
}

#[async_trait]
impl CommandHandler for AnswerCommand {
    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &[String],
    ) -> Result<(), SalesCallError> {
        answer_query(ctx, arg(args, 0), arg(args, 1)).await.map(|_| ())
    }

    fn validate(&self, args: &[String]) -> Result<(), SalesCallError> {
        require_file_and_query(arg(args, 0), arg(args, 1)).map(|_| ())
    }

    fn help(&self) -> &'static str {
        "answer <input_file_name> <query> - Answer a question about a transcript"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ChatProvider, Role};
    use std::sync::Mutex;

    struct StubGateway {
        result: CompletionResult,
        prompts: Mutex<Vec<Vec<Message>>>,
    }

    impl StubGateway {
        fn new(id: &str, text: &str) -> Self {
            Self {
                result: CompletionResult {
                    id: id.to_string(),
                    created_at: 100,
                    text: text.to_string(),
                },
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatProvider for StubGateway {
        async fn complete(&self, prompt: &[Message]) -> Result<CompletionResult, SalesCallError> {
            self.prompts.lock().unwrap().push(prompt.to_vec());
            Ok(self.result.clone())
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    #[test]
    fn output_path_uses_id_when_no_name_given() {
        assert_eq!(
            resolve_output_path("./output", None, "chatcmpl-9"),
            PathBuf::from("./output/chatcmpl-9")
        );
        assert_eq!(
            resolve_output_path("./output", Some(""), "chatcmpl-9"),
            PathBuf::from("./output/chatcmpl-9")
        );
    }

    #[test]
    fn output_path_prefixes_bare_names() {
        assert_eq!(
            resolve_output_path("./output", Some("foo.txt"), "x"),
            PathBuf::from("./output/foo.txt")
        );
        assert_eq!(
            resolve_output_path("./output/", Some("nested/foo.txt"), "x"),
            PathBuf::from("./output/nested/foo.txt")
        );
    }

    #[test]
    fn output_path_is_not_double_prefixed() {
        assert_eq!(
            resolve_output_path("./output", Some("./output/bar.txt"), "x"),
            PathBuf::from("./output/bar.txt")
        );
    }

    #[tokio::test]
    async fn generate_sends_single_user_message_and_saves_result() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("output");
        let output_dir = output_dir.to_str().unwrap();
        let gateway = StubGateway::new("gen-1", "00:00:00 A (a.com): Hi");
        let mut out = Vec::<u8>::new();
        let mut ctx = CommandContext {
            gateway: &gateway,
            output_dir,
            out: &mut out,
        };

        generate_transcript(&mut ctx, None).await.unwrap();

        let written = fs::read_to_string(format!("{output_dir}/gen-1")).unwrap();
        assert_eq!(written, "00:00:00 A (a.com): Hi");
        assert_eq!(String::from_utf8(out).unwrap(), "00:00:00 A (a.com): Hi\n");

        let prompts = gateway.prompts.lock().unwrap();
        assert_eq!(prompts[0].len(), 1);
        assert_eq!(prompts[0][0].role, Role::User);
        assert!(prompts[0][0].content.contains("only the transcript"));
    }

    #[tokio::test]
    async fn generate_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().to_str().unwrap();
        fs::write(dir.path().join("call.txt"), "old contents that are longer").unwrap();
        let gateway = StubGateway::new("gen-2", "new");
        let mut out = Vec::<u8>::new();
        let mut ctx = CommandContext {
            gateway: &gateway,
            output_dir,
            out: &mut out,
        };

        generate_transcript(&mut ctx, Some("call.txt")).await.unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("call.txt")).unwrap(), "new");
    }

    #[tokio::test]
    async fn summarize_requires_file_name_before_calling_gateway() {
        let gateway = StubGateway::new("x", "unused");
        let mut out = Vec::<u8>::new();
        let mut ctx = CommandContext {
            gateway: &gateway,
            output_dir: "./output",
            out: &mut out,
        };

        let err = summarize_transcript(&mut ctx, None).await.unwrap_err();
        assert!(matches!(err, SalesCallError::MissingArgument(_)));
        assert_eq!(gateway.calls(), 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn summarize_unreadable_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let gateway = StubGateway::new("x", "unused");
        let mut out = Vec::<u8>::new();
        let mut ctx = CommandContext {
            gateway: &gateway,
            output_dir: "./output",
            out: &mut out,
        };

        let err = summarize_transcript(&mut ctx, missing.to_str())
            .await
            .unwrap_err();
        assert!(matches!(err, SalesCallError::Io { .. }));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn answer_requires_both_arguments() {
        let gateway = StubGateway::new("x", "unused");
        let mut out = Vec::<u8>::new();
        let mut ctx = CommandContext {
            gateway: &gateway,
            output_dir: "./output",
            out: &mut out,
        };

        for (file, query) in [(None, Some("who?")), (Some("t.txt"), None), (Some("t.txt"), Some(""))] {
            let err = answer_query(&mut ctx, file, query).await.unwrap_err();
            assert!(matches!(err, SalesCallError::MissingArgument(_)));
        }
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn answer_sends_transcript_and_query_as_separate_user_messages() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = dir.path().join("t.txt");
        fs::write(&transcript, "00:00:01 Sam: 5000 GPUs").unwrap();
        let gateway = StubGateway::new("ans-1", "5000");
        let mut out = Vec::<u8>::new();
        let mut ctx = CommandContext {
            gateway: &gateway,
            output_dir: "./output",
            out: &mut out,
        };

        answer_query(&mut ctx, transcript.to_str(), Some("How many GPUs?"))
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "5000\n");
        let prompts = gateway.prompts.lock().unwrap();
        assert_eq!(
            prompts[0],
            vec![
                Message::system(ANSWER_SYSTEM_PROMPT),
                Message::user("00:00:01 Sam: 5000 GPUs"),
                Message::user("How many GPUs?"),
            ]
        );
    }

    #[tokio::test]
    async fn handlers_read_positional_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().to_str().unwrap();
        let gateway = StubGateway::new("gen-3", "body");
        let mut out = Vec::<u8>::new();
        let mut ctx = CommandContext {
            gateway: &gateway,
            output_dir,
            out: &mut out,
        };

        GenerateCommand
            .execute(&mut ctx, &["named.txt".to_string()])
            .await
            .unwrap();
        assert!(dir.path().join("named.txt").exists());

        let err = SummarizeCommand.execute(&mut ctx, &[]).await.unwrap_err();
        assert!(matches!(err, SalesCallError::MissingArgument(_)));
    }

    #[test]
    fn validate_checks_arguments_without_side_effects() {
        let file = vec!["t.txt".to_string()];
        let file_and_query = vec!["t.txt".to_string(), "Who won?".to_string()];

        assert!(GenerateCommand.validate(&[]).is_ok());
        assert!(matches!(
            SummarizeCommand.validate(&[]),
            Err(SalesCallError::MissingArgument(_))
        ));
        assert!(SummarizeCommand.validate(&file).is_ok());
        assert!(matches!(
            AnswerCommand.validate(&file),
            Err(SalesCallError::MissingArgument(_))
        ));
        assert!(AnswerCommand.validate(&file_and_query).is_ok());
    }
}

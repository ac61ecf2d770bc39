//! Console front end: reads commands from stdin and forwards them to the
//! application actor.

use crate::{AppCommand, AppError, AppResult, ConsoleCommand};

use std::panic::Location;

use error_location::ErrorLocation;
use interview_desk_core::LinkRequest;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{mpsc, watch},
};
use tracing::{debug, info, instrument};

/// Usage text printed by `help`.
pub(crate) const USAGE: &str = "\
Recording:
  access | retry             request camera and microphone access
  start | stop               start or stop recording
  submit [interview-id]      upload the captured recording
  status                     show capture and interview state
Candidates and links:
  dashboard                  show headline figures and recent activity
  candidates                 list candidates
  search <text>              find candidates by name or position
  select <id>                show one candidate
  analysis <id>              show a candidate's interview analysis
  questions                  list the question bank
  templates                  list interview templates
  generate <position> | <name> | <q1,q2,...> [| <email>]
  links                      list generated links
  copy <n> | open <n>        copy or open link n
  email <n> [address]        send link n to a candidate
  preview <n>                enter the interview room for link n
Interview room:
  begin | next               start the interview or advance a question
  mic | camera               toggle microphone or camera
  help | quit";

/// Reads stdin line by line until EOF, `quit` or shutdown.
pub struct ConsoleReader<S> {
    command_tx: mpsc::Sender<AppCommand<S>>,
}

impl<S: Send + 'static> ConsoleReader<S> {
    /// Create a reader that forwards to `command_tx`.
    pub fn new(command_tx: mpsc::Sender<AppCommand<S>>) -> Self {
        Self { command_tx }
    }

    /// Run until shutdown is signalled or stdin closes.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Console reader shutting down");
                    break;
                }
                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if !self.forward_line(&line).await? {
                                break;
                            }
                        }
                        None => {
                            debug!("Console input closed");
                            self.send(AppCommand::Shutdown).await?;
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Parse and forward one line. Returns `false` once quit was sent.
    async fn forward_line(&self, line: &str) -> AppResult<bool> {
        match parse_command(line) {
            Ok(None) => Ok(true),
            Ok(Some(ConsoleCommand::Quit)) => {
                self.send(AppCommand::Shutdown).await?;
                Ok(false)
            }
            Ok(Some(command)) => {
                self.send(AppCommand::Console(command)).await?;
                Ok(true)
            }
            Err(e) => {
                let message = match e {
                    AppError::UnknownCommand { input, .. } => input,
                    other => other.to_string(),
                };
                self.send(AppCommand::Rejected { message }).await?;
                Ok(true)
            }
        }
    }

    async fn send(&self, command: AppCommand<S>) -> AppResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send console command: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Parse one console line. Blank lines yield `None`.
///
/// # Errors
///
/// `UnknownCommand` for unrecognised verbs or malformed arguments.
#[track_caller]
pub(crate) fn parse_command(line: &str) -> AppResult<Option<ConsoleCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "access" => ConsoleCommand::Access,
        "retry" => ConsoleCommand::Retry,
        "start" => ConsoleCommand::Start,
        "stop" => ConsoleCommand::Stop,
        "submit" => ConsoleCommand::Submit {
            interview_id: non_empty(rest),
        },
        "status" => ConsoleCommand::Status,
        "candidates" => ConsoleCommand::Candidates,
        "search" => ConsoleCommand::Search {
            query: required(rest, "search <text>")?.to_string(),
        },
        "analysis" => ConsoleCommand::Analysis {
            id: required(rest, "analysis <candidate-id>")?.to_string(),
        },
        "dashboard" => ConsoleCommand::Dashboard,
        "templates" => ConsoleCommand::Templates,
        "select" => ConsoleCommand::Select {
            id: required(rest, "select <candidate-id>")?.to_string(),
        },
        "questions" => ConsoleCommand::Questions,
        "generate" => ConsoleCommand::Generate(parse_link_request(rest)?),
        "links" => ConsoleCommand::Links,
        "copy" => ConsoleCommand::Copy {
            index: parse_index(rest, "copy <n>")?,
        },
        "open" => ConsoleCommand::Open {
            index: parse_index(rest, "open <n>")?,
        },
        "email" => {
            let (index, address) = match rest.split_once(char::is_whitespace) {
                Some((index, address)) => (index, non_empty(address.trim())),
                None => (rest, None),
            };
            ConsoleCommand::Email {
                index: parse_index(index, "email <n> [address]")?,
                address,
            }
        }
        "preview" => ConsoleCommand::Preview {
            index: parse_index(rest, "preview <n>")?,
        },
        "begin" => ConsoleCommand::Begin,
        "next" => ConsoleCommand::Next,
        "mic" => ConsoleCommand::Mic,
        "camera" => ConsoleCommand::Camera,
        "help" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => {
            return Err(AppError::UnknownCommand {
                input: line.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    Ok(Some(command))
}

/// `<position> | <name> | <q1,q2,...> [| <email>]`
///
/// Empty fields are kept empty so validation can report them.
#[track_caller]
fn parse_link_request(rest: &str) -> AppResult<LinkRequest> {
    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    if fields.len() < 3 || fields.len() > 4 {
        return Err(AppError::UnknownCommand {
            input: "usage: generate <position> | <name> | <q1,q2,...> [| <email>]".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let question_ids = fields[2]
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect();

    Ok(LinkRequest {
        position: fields[0].to_string(),
        candidate_name: fields[1].to_string(),
        candidate_email: fields.get(3).and_then(|email| non_empty(email)),
        question_ids,
    })
}

#[track_caller]
fn parse_index(arg: &str, usage: &str) -> AppResult<usize> {
    match arg.trim().parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(AppError::UnknownCommand {
            input: format!("usage: {}", usage),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

#[track_caller]
fn required<'a>(arg: &'a str, usage: &str) -> AppResult<&'a str> {
    if arg.is_empty() {
        return Err(AppError::UnknownCommand {
            input: format!("usage: {}", usage),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(arg)
}

fn non_empty(arg: &str) -> Option<String> {
    let arg = arg.trim();
    (!arg.is_empty()).then(|| arg.to_string())
}

use crate::io::{Io, Pipe};
use crate::render::Report;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Board, InvalidMove};
use lib::session::Game;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::io::ErrorKind;
use tokio::io::{stdin, stdout};
use tracing::{debug, info, instrument, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

/// Serves a game of chess to tool-calling agents over stdio.
///
/// Speaks line-delimited JSON-RPC 2.0, exposing the tools `new_game`, `make_move` and
/// `get_game_state`.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Serve {
    /// The starting position in FEN notation.
    #[clap(long)]
    fen: Option<Board>,
}

impl Serve {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let game = Game::new(self.fen.unwrap_or_default());
        let io = Pipe::new(stdout(), stdin());
        Server::new(game, io).run().await
    }
}

/// Keeps an explicit `null` id, since only notifications lack one.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default, deserialize_with = "present")]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
struct Failure {
    code: i64,
    message: String,
}

impl Failure {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Failure {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Response {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Failure>,
}

impl Response {
    fn new(id: Value, outcome: Result<Value, Failure>) -> Self {
        let (result, error) = match outcome {
            Ok(v) => (Some(v), None),
            Err(e) => (None, Some(e)),
        };

        Response {
            jsonrpc: "2.0",
            id,
            result,
            error,
        }
    }
}

fn tools() -> Value {
    json!([
        {
            "name": "new_game",
            "description": "Start a new chess game. This will reset the current game board to the initial position.",
            "inputSchema": { "type": "object", "properties": {}, "required": [] }
        },
        {
            "name": "make_move",
            "description": "Make a chess move. Validates the move and applies it if legal. \
                Accepts moves in UCI format (e.g., 'e2e4', 'e7e5', 'e1g1' for castling) \
                or Standard Algebraic Notation (e.g., 'e4', 'Nf3', 'O-O' for castling). \
                Returns the updated board state after the move.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "move": {
                        "type": "string",
                        "description": "The move to make in UCI format (e.g., 'e2e4') or SAN format (e.g., 'e4', 'Nf3')"
                    }
                },
                "required": ["move"]
            }
        },
        {
            "name": "get_game_state",
            "description": "Get the current state of the chess game. Returns the board position with \
                Unicode chess pieces and rank/file labels, captured pieces for each side, \
                last move played, whose turn it is, game status, and FEN notation.",
            "inputSchema": { "type": "object", "properties": {}, "required": [] }
        }
    ])
}

struct Server<T: Io> {
    game: Game,
    io: T,
}

impl<T: Io> Server<T> {
    fn new(game: Game, io: T) -> Self {
        Server { game, io }
    }

    /// Handles a single line of input, returning the response if one is due.
    fn handle(&mut self, line: &str) -> Option<Response> {
        let request: Request = match serde_json::from_str::<Value>(line) {
            Err(e) => {
                warn!(%e, "malformed message");
                return Some(Response::new(Value::Null, Err(Failure::new(PARSE_ERROR, e.to_string()))));
            }

            Ok(value) => match serde_json::from_value(value) {
                Ok(request) => request,
                Err(e) => {
                    warn!(%e, "invalid request");
                    let failure = Failure::new(INVALID_REQUEST, e.to_string());
                    return Some(Response::new(Value::Null, Err(failure)));
                }
            },
        };

        let outcome = self.dispatch(&request.method, request.params);
        Some(Response::new(request.id?, outcome))
    }

    #[instrument(level = "debug", skip(self, params), err(Debug))]
    fn dispatch(&mut self, method: &str, params: Value) -> Result<Value, Failure> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                },
            })),

            "ping" => Ok(json!({})),

            "tools/list" => Ok(json!({ "tools": tools() })),

            "tools/call" => {
                let call: ToolCall = serde_json::from_value(params)
                    .map_err(|e| Failure::new(INVALID_PARAMS, e.to_string()))?;

                let text = self.call(&call.name, &call.arguments);
                Ok(json!({ "content": [{ "type": "text", "text": text }] }))
            }

            m if m.starts_with("notifications/") => Ok(Value::Null),

            m => Err(Failure::new(METHOD_NOT_FOUND, format!("method `{m}` not found"))),
        }
    }

    /// Invokes a tool, returning the text shown to the agent.
    fn call(&mut self, name: &str, arguments: &Value) -> String {
        match name {
            "new_game" => {
                self.game.reset();
                info!("new game");
                let state = self.game.current_state();
                format!("New game started!\n\n{}", Report(&state))
            }

            "make_move" => {
                let Some(m) = arguments.get("move").and_then(Value::as_str).filter(|m| !m.is_empty())
                else {
                    return "Error: Move parameter is required".into();
                };

                match self.game.apply_move(m) {
                    Ok(played) => {
                        info!(san = %played.san, status = %played.status);
                        let state = self.game.current_state();
                        format!("Move {m} played successfully!\n\n{}", Report(&state))
                    }

                    Err(InvalidMove::EmptyInput) => "Error: Move parameter is required".into(),

                    Err(InvalidMove::UnknownNotation(_)) => format!(
                        "Error: Invalid move format '{m}'. \
                        Use UCI format (e.g., 'e2e4') or SAN format (e.g., 'e4', 'Nf3')."
                    ),

                    Err(InvalidMove::AmbiguousNotation(_)) => format!(
                        "Error: Ambiguous move '{m}'. \
                        Add the file or rank the piece moves from (e.g., 'Nge2') or use UCI format."
                    ),

                    Err(InvalidMove::IllegalMove(_)) => format!(
                        "Error: Illegal move '{m}'. That move is not legal in the current position."
                    ),
                }
            }

            "get_game_state" => Report(&self.game.current_state()).to_string(),

            _ => {
                debug!(name, "unknown tool");
                format!("Error: Unknown tool '{name}'")
            }
        }
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn run(&mut self) -> Result<(), Anyhow> {
        loop {
            let line = match self.io.recv().await {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break Ok(()),
                Err(e) => break Err(e.into()),
            };

            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle(&line) {
                self.io.send(&serde_json::to_string(&response)?).await?;
                self.io.flush().await?;
            }
        }
    }
}

//! Line-delimited JSON dispatcher over the store boundary.
//!
//! Each request line is `{"id": <any>, "method": "<ns>.<op>", "params": {..}}`
//! and produces exactly one response line, either `{"id", "result"}` or
//! `{"id", "error": {"kind", "message", "errors"?}}`.
//!
//! | Method                                   | Params                         | Result                |
//! |------------------------------------------|--------------------------------|-----------------------|
//! | `skills.list` / `agents.list`            | none                           | array of resources    |
//! | `skills.read` / `agents.read`            | `name`                         | resource or `null`    |
//! | `skills.write` / `agents.write`          | `name`, `content`              | `{path}`              |
//! | `*.delete` / `*.revert` / `*.override`   | `name`                         | `{path}`              |
//! | `skills.diff` / `agents.diff`            | `name`                         | diff or `null`        |
//! | `templates.{list,read,write,override}`   | `path` (+ `content` for write) | as above              |
//! | `config.read`                            | none                           | document or `null`    |
//! | `config.write`                           | `document` or `content` (YAML) | `{path}`              |
//! | `system.getPaths`                        | none                           | root paths            |
//! | `system.refresh`                         | none                           | counts and root paths |
//! | `system.setProjectRoot`                  | `path` (string or `null`)      | root paths            |

use aosm_store::{Layer, LayeredStore, StoreError, Workspace};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// One request line.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Error payload with a stable `kind` code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Failures of a single call.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("failed to encode result: {0}")]
    Encode(String),
}

impl DispatchError {
    /// Stable machine-readable code; store errors keep their own codes.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Store(err) => err.kind(),
            DispatchError::UnknownMethod(_) => "unknown_method",
            DispatchError::InvalidParams(_) => "invalid_params",
            DispatchError::InvalidRequest(_) => "invalid_request",
            DispatchError::Encode(_) => "internal",
        }
    }

    fn body(&self) -> ErrorBody {
        let errors = match self {
            DispatchError::Store(err) => err.validation_errors().map(<[String]>::to_vec),
            _ => None,
        };
        ErrorBody {
            kind: self.kind().to_string(),
            message: self.to_string(),
            errors,
        }
    }
}

type CallResult = Result<Value, DispatchError>;

#[derive(Deserialize)]
struct NameParams {
    name: String,
}

#[derive(Deserialize)]
struct WriteParams {
    name: String,
    content: String,
}

#[derive(Deserialize)]
struct TemplateParams {
    #[serde(alias = "relative_path")]
    path: String,
}

#[derive(Deserialize)]
struct TemplateWriteParams {
    #[serde(alias = "relative_path")]
    path: String,
    content: String,
}

#[derive(Deserialize)]
struct ConfigWriteParams {
    document: Option<Value>,
    content: Option<String>,
}

#[derive(Deserialize)]
struct ProjectRootParams {
    path: Option<PathBuf>,
}

fn params<T: DeserializeOwned>(value: Value) -> Result<T, DispatchError> {
    let value = if value.is_null() { json!({}) } else { value };
    serde_json::from_value(value).map_err(|err| DispatchError::InvalidParams(err.to_string()))
}

fn encode<T: Serialize>(value: &T) -> CallResult {
    serde_json::to_value(value).map_err(|err| DispatchError::Encode(err.to_string()))
}

fn written(path: &Path) -> Value {
    json!({ "path": path })
}

/// Routes calls to a [`Workspace`].
pub struct Dispatcher {
    workspace: Workspace,
}

impl Dispatcher {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Executes one method call.
    pub fn call(&self, method: &str, params: Value) -> CallResult {
        let Some((namespace, op)) = method.split_once('.') else {
            return Err(DispatchError::UnknownMethod(method.to_string()));
        };
        match namespace {
            "skills" => resource_call(self.workspace.skills(), method, op, params),
            "agents" => resource_call(self.workspace.agents(), method, op, params),
            "templates" => self.template_call(method, op, params),
            "config" => self.config_call(method, op, params),
            "system" => self.system_call(method, op, params),
            _ => Err(DispatchError::UnknownMethod(method.to_string())),
        }
    }

    fn template_call(&self, method: &str, op: &str, raw: Value) -> CallResult {
        let store = self.workspace.templates();
        match op {
            "list" => encode(&store.list()),
            "read" => {
                let p: TemplateParams = params(raw)?;
                encode(&store.read(&p.path))
            }
            "write" => {
                let p: TemplateWriteParams = params(raw)?;
                Ok(written(&store.write(&p.path, &p.content)?))
            }
            "override" => {
                let p: TemplateParams = params(raw)?;
                Ok(written(&store.override_global(&p.path)?))
            }
            _ => Err(DispatchError::UnknownMethod(method.to_string())),
        }
    }

    fn config_call(&self, method: &str, op: &str, raw: Value) -> CallResult {
        let store = self.workspace.config();
        match op {
            "read" => encode(&store.read()?),
            "write" => {
                let p: ConfigWriteParams = params(raw)?;
                let path = match (p.document, p.content) {
                    (Some(document), _) => {
                        let doc = serde_yaml::to_value(document)
                            .map_err(|err| DispatchError::InvalidParams(err.to_string()))?;
                        store.write(&doc)?
                    }
                    (None, Some(text)) => store.write_raw(&text)?,
                    (None, None) => {
                        return Err(DispatchError::InvalidParams(
                            "expected `document` or `content`".to_string(),
                        ))
                    }
                };
                Ok(written(&path))
            }
            _ => Err(DispatchError::UnknownMethod(method.to_string())),
        }
    }

    fn system_call(&self, method: &str, op: &str, raw: Value) -> CallResult {
        match op {
            "getPaths" => encode(&self.workspace.paths()),
            "refresh" => encode(&self.workspace.refresh()),
            "setProjectRoot" => {
                let p: ProjectRootParams = params(raw)?;
                encode(&self.workspace.set_project_root(p.path))
            }
            _ => Err(DispatchError::UnknownMethod(method.to_string())),
        }
    }

    /// Executes a request and wraps the outcome.
    pub fn handle(&self, request: Request) -> Response {
        tracing::debug!(method = %request.method, "dispatching request");
        let outcome = self.call(&request.method, request.params);
        respond(request.id, outcome)
    }

    /// Parses and executes one request line.
    pub fn handle_line(&self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request),
            Err(err) => respond(
                Value::Null,
                Err(DispatchError::InvalidRequest(err.to_string())),
            ),
        }
    }

    /// Reads requests from `input` until EOF, writing one response per line.
    pub fn serve<R: BufRead, W: Write>(&self, input: R, mut output: W) -> std::io::Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let response = self.handle_line(&line);
            serde_json::to_writer(&mut output, &response)?;
            output.write_all(b"\n")?;
            output.flush()?;
        }
        Ok(())
    }
}

fn respond(id: Value, outcome: CallResult) -> Response {
    match outcome {
        Ok(result) => Response {
            id,
            result: Some(result),
            error: None,
        },
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "request failed");
            Response {
                id,
                result: None,
                error: Some(err.body()),
            }
        }
    }
}

fn resource_call<L: Layer>(store: &LayeredStore<L>, method: &str, op: &str, raw: Value) -> CallResult {
    match op {
        "list" => encode(&store.list()),
        "read" => {
            let p: NameParams = params(raw)?;
            encode(&store.read(&p.name))
        }
        "write" => {
            let p: WriteParams = params(raw)?;
            Ok(written(&store.write(&p.name, &p.content)?))
        }
        "delete" => {
            let p: NameParams = params(raw)?;
            Ok(written(&store.delete(&p.name)?))
        }
        "override" => {
            let p: NameParams = params(raw)?;
            Ok(written(&store.override_global(&p.name)?))
        }
        "revert" => {
            let p: NameParams = params(raw)?;
            Ok(written(&store.revert(&p.name)?))
        }
        "diff" => {
            let p: NameParams = params(raw)?;
            encode(&store.diff(&p.name)?)
        }
        _ => Err(DispatchError::UnknownMethod(method.to_string())),
    }
}

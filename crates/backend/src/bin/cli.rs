use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use shared_types::{
    CreateListRequest, CreateTaskRequest, ErrorResponse, RenameListRequest, Task, TodoList,
    UpdateTaskRequest, User,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "todo-cli")]
#[command(about = "CLI for managing to-do lists and tasks via the backend API")]
#[command(
    long_about = "A command-line interface for interacting with the to-do backend server.\n\n\
    Supports creating, listing, renaming, and deleting lists and their tasks.\n\
    Can also mint development tokens for a backend configured with AUTH_JWT_SECRET."
)]
struct Cli {
    /// Backend server URL to connect to.
    ///
    /// The CLI will make HTTP requests to this server's API endpoints.
    /// Use this to connect to a remote server or a different port.
    #[arg(
        short,
        long,
        default_value = "http://localhost:4000",
        env = "TODO_API_URL"
    )]
    base_url: String,

    /// Session token sent as `Authorization: Bearer <token>`.
    #[arg(short, long, env = "TODO_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a development token signed with the backend's shared secret
    ///
    /// Only useful when the backend verifies tokens with AUTH_JWT_SECRET
    /// instead of the identity provider's public key.
    DevToken {
        /// Identity to embed as the token subject.
        #[arg(short, long)]
        subject: String,

        /// Shared HS256 secret; must match the backend's.
        #[arg(long, env = "AUTH_JWT_SECRET", hide_env_values = true)]
        secret: String,

        /// Minutes until the token expires.
        #[arg(long, default_value_t = 60)]
        ttl_minutes: i64,

        /// Issuer claim, for backends that check AUTH_ISSUER.
        #[arg(long, env = "AUTH_ISSUER")]
        issuer: Option<String>,
    },
    /// Create the local user for the token's identity (safe to repeat)
    Sync,
    /// Manage lists - list, create, rename, delete
    Lists {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Manage tasks - add, update, mark done or undone, delete
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// Show all lists with their tasks
    ///
    /// Displays each list with its short ID and progress, followed by its
    /// tasks with a checkbox indicator (○ pending, ✓ completed).
    List,

    /// Create a new, empty list
    Create {
        /// The title of the list (e.g., "Groceries").
        title: String,
    },

    /// Rename an existing list
    Rename {
        /// The UUID of the list to rename.
        /// Use 'lists list' to find the ID (shown in brackets).
        id: Uuid,

        /// The new title.
        title: String,
    },

    /// Permanently delete a list and all of its tasks
    ///
    /// This action cannot be undone.
    Delete {
        /// The UUID of the list to delete.
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// Add a task to a list
    Add {
        /// The UUID of the list to add to.
        list_id: Uuid,

        /// What needs doing.
        content: String,
    },

    /// Update a task's content or completion status
    ///
    /// Only specified fields will be updated.
    Update {
        /// The UUID of the task to update.
        id: Uuid,

        /// New content to replace the existing one.
        #[arg(short, long, value_name = "TEXT")]
        content: Option<String>,

        /// Set the completion status.
        /// Use --completed=true to mark as done, --completed=false to reopen.
        #[arg(long, value_name = "BOOL")]
        completed: Option<bool>,
    },

    /// Mark a task as completed
    ///
    /// Shorthand for 'update <id> --completed=true'.
    Done {
        /// The UUID of the task to mark as completed.
        id: Uuid,
    },

    /// Mark a task as not completed (reopen)
    ///
    /// Shorthand for 'update <id> --completed=false'.
    Undone {
        /// The UUID of the task to reopen.
        id: Uuid,
    },

    /// Permanently delete a task
    Delete {
        /// The UUID of the task to delete.
        id: Uuid,
    },
}

#[derive(Serialize)]
struct DevClaims {
    sub: String,
    exp: i64,
    iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    iss: Option<String>,
}

/// Thin authenticated wrapper over the `/api` endpoints.
struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, request: RequestBuilder) -> anyhow::Result<reqwest::Response> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to reach the backend")?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            bail!("Request failed ({}): {}", status.as_u16(), message);
        }
        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let response = self.send(self.client.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> anyhow::Result<T> {
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> anyhow::Result<T> {
        let response = self.send(self.client.put(self.url(path)).json(body)).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, path: &str) -> anyhow::Result<()> {
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }
}

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::DevToken {
        subject,
        secret,
        ttl_minutes,
        issuer,
    } = &cli.command
    {
        let now = chrono::Utc::now();
        let claims = DevClaims {
            sub: subject.clone(),
            exp: (now + chrono::Duration::minutes(*ttl_minutes)).timestamp(),
            iat: now.timestamp(),
            iss: issuer.clone(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .context("Failed to sign token")?;
        println!("{}", token);
        return Ok(());
    }

    let token = cli
        .token
        .clone()
        .context("No token given; pass --token or set TODO_API_TOKEN")?;
    let api = ApiClient {
        client: Client::new(),
        base_url: cli.base_url.clone(),
        token,
    };

    match cli.command {
        Commands::DevToken { .. } => {}
        Commands::Sync => {
            let user: User = api.post::<(), _>("/sync-user", None).await?;
            println!("Synced user: [{}] {}", short_id(user.id), user.external_auth_id);
        }
        Commands::Lists { action } => handle_lists(&api, action).await?,
        Commands::Tasks { action } => handle_tasks(&api, action).await?,
    }

    Ok(())
}

async fn handle_lists(api: &ApiClient, action: ListAction) -> anyhow::Result<()> {
    match action {
        ListAction::List => {
            let lists: Vec<TodoList> = api.get("/lists").await?;
            if lists.is_empty() {
                println!("No lists found.");
            } else {
                for list in lists {
                    println!(
                        "[{}] {} ({}/{})",
                        short_id(list.id),
                        list.title,
                        list.completed_count(),
                        list.tasks.len()
                    );
                    for task in &list.tasks {
                        let status = if task.completed { "✓" } else { "○" };
                        println!("    {} [{}] {}", status, short_id(task.id), task.content);
                    }
                }
            }
        }
        ListAction::Create { title } => {
            let req = CreateListRequest { title };
            let list: TodoList = api.post("/lists", Some(&req)).await?;
            println!("Created list: [{}] {}", short_id(list.id), list.title);
        }
        ListAction::Rename { id, title } => {
            let req = RenameListRequest { title };
            let list: TodoList = api.put(&format!("/lists/{}", id), &req).await?;
            println!("Renamed list: [{}] {}", short_id(list.id), list.title);
        }
        ListAction::Delete { id } => {
            api.delete(&format!("/lists/{}", id)).await?;
            println!("Deleted list: {}", id);
        }
    }

    Ok(())
}

async fn handle_tasks(api: &ApiClient, action: TaskAction) -> anyhow::Result<()> {
    let (id, req, verb) = match action {
        TaskAction::Add { list_id, content } => {
            let req = CreateTaskRequest { content };
            let task: Task = api
                .post(&format!("/lists/{}/tasks", list_id), Some(&req))
                .await?;
            println!("Added task: [{}] {}", short_id(task.id), task.content);
            return Ok(());
        }
        TaskAction::Delete { id } => {
            api.delete(&format!("/tasks/{}", id)).await?;
            println!("Deleted task: {}", id);
            return Ok(());
        }
        TaskAction::Update {
            id,
            content,
            completed,
        } => (id, UpdateTaskRequest { completed, content }, "Updated task"),
        TaskAction::Done { id } => (id, UpdateTaskRequest::completed(true), "Marked as done"),
        TaskAction::Undone { id } => (id, UpdateTaskRequest::completed(false), "Marked as not done"),
    };

    if req.is_empty() {
        bail!("Nothing to update; pass --content and/or --completed");
    }

    let task: Task = api.put(&format!("/tasks/{}", id), &req).await?;
    println!("{}: [{}] {}", verb, short_id(task.id), task.content);

    Ok(())
}

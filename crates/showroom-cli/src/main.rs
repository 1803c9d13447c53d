use clap::{Args, Parser, Subcommand};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;

#[derive(Parser)]
#[command(name = "showroom")]
#[command(about = "A CLI for administering the Showroom dealership service")]
struct Cli {
    /// Base URL for the Showroom service
    #[arg(long, default_value = "http://localhost:3000")]
    service_url: String,

    /// Admin token from `showroom login`
    #[arg(long, env = "SHOWROOM_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as the administrator and print a token
    Login {
        /// Admin username or email
        #[arg(short, long)]
        username: String,
        /// Admin password
        #[arg(short, long, env = "SHOWROOM_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Manage the vehicle catalogue
    #[command(subcommand)]
    Cars(CarCommands),
    /// Manage blog posts
    #[command(subcommand)]
    Posts(PostCommands),
    /// Review contact notifications
    #[command(subcommand)]
    Notifications(NotificationCommands),
}

#[derive(Subcommand)]
enum CarCommands {
    /// List every vehicle, newest first
    List,
    /// Show one vehicle
    Get { id: i32 },
    /// Add a vehicle to the catalogue
    Add(NewVehicleArgs),
    /// Remove a vehicle
    Delete { id: i32 },
}

#[derive(Args, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewVehicleArgs {
    /// Car, Truck or Tractor
    #[arg(long)]
    category: String,
    #[arg(long)]
    brand: String,
    #[arg(long)]
    model: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    odometer: Option<i64>,
    /// Gasoline, Diesel, Electric or Hybrid
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    fuel_type: Option<String>,
    /// Manual or Automatic
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    transmission: Option<String>,
    #[arg(long)]
    tonnage: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Image URL, repeatable
    #[arg(long = "image")]
    images: Vec<String>,
}

#[derive(Subcommand)]
enum PostCommands {
    /// List posts (drafts included when a token is given)
    List,
    /// Publish a new post
    Add(NewPostArgs),
    /// Remove a post
    Delete { id: i32 },
}

#[derive(Args, Serialize)]
struct NewPostArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    content: String,
    /// Cover image URL
    #[arg(long)]
    image: String,
    #[arg(long)]
    excerpt: Option<String>,
    /// Advice, News, Maintenance or Events
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    /// Save as a draft instead of publishing
    #[arg(long = "draft", action = clap::ArgAction::SetFalse)]
    published: bool,
}

#[derive(Subcommand)]
enum NotificationCommands {
    /// Show the most recent notifications
    List,
    /// Mark every notification as read
    MarkRead,
    /// Delete every notification
    Clear,
}

#[derive(Serialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

struct ServiceClient {
    client: Client,
    service_url: String,
    token: Option<String>,
}

impl ServiceClient {
    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}/api{path}", self.service_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn admin_request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<RequestBuilder, Box<dyn Error>> {
        if self.token.is_none() {
            return Err("this command needs --token or SHOWROOM_TOKEN (run `showroom login`)".into());
        }
        Ok(self.request(method, path))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let service = ServiceClient {
        client: Client::new(),
        service_url: cli.service_url.trim_end_matches('/').to_string(),
        token: cli.token,
    };

    match cli.command {
        Commands::Login { username, password } => login(&service, username, password).await?,
        Commands::Cars(command) => cars(&service, command).await?,
        Commands::Posts(command) => posts(&service, command).await?,
        Commands::Notifications(command) => notifications(&service, command).await?,
    }

    Ok(())
}

async fn login(
    service: &ServiceClient,
    username: String,
    password: String,
) -> Result<(), Box<dyn Error>> {
    let payload = LoginRequest { username, password };

    let response = service
        .request(reqwest::Method::POST, "/login")
        .json(&payload)
        .send()
        .await?;

    if response.status().is_success() {
        let login_response: LoginResponse = response.json().await?;
        println!("{}", login_response.token);
    } else {
        report_failure("Login failed", response).await?;
    }

    Ok(())
}

async fn cars(service: &ServiceClient, command: CarCommands) -> Result<(), Box<dyn Error>> {
    use reqwest::Method;

    let request = match command {
        CarCommands::List => service.request(Method::GET, "/cars"),
        CarCommands::Get { id } => service.request(Method::GET, &format!("/cars/{id}")),
        CarCommands::Add(vehicle) => service
            .admin_request(Method::POST, "/cars/add")?
            .json(&vehicle),
        CarCommands::Delete { id } => {
            service.admin_request(Method::DELETE, &format!("/cars/{id}"))?
        }
    };

    print_response(request).await
}

async fn posts(service: &ServiceClient, command: PostCommands) -> Result<(), Box<dyn Error>> {
    use reqwest::Method;

    let request = match command {
        PostCommands::List => service.request(Method::GET, "/posts"),
        PostCommands::Add(post) => service.admin_request(Method::POST, "/posts")?.json(&post),
        PostCommands::Delete { id } => {
            service.admin_request(Method::DELETE, &format!("/posts/{id}"))?
        }
    };

    print_response(request).await
}

async fn notifications(
    service: &ServiceClient,
    command: NotificationCommands,
) -> Result<(), Box<dyn Error>> {
    use reqwest::Method;

    let request = match command {
        NotificationCommands::List => service.admin_request(Method::GET, "/notifications")?,
        NotificationCommands::MarkRead => {
            service.admin_request(Method::PUT, "/notifications/mark-as-read")?
        }
        NotificationCommands::Clear => {
            service.admin_request(Method::DELETE, "/notifications/clear-all")?
        }
    };

    print_response(request).await
}

async fn print_response(request: RequestBuilder) -> Result<(), Box<dyn Error>> {
    let response = request.send().await?;

    if response.status().is_success() {
        let body: Value = response.json().await?;
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        report_failure("Request failed", response).await?;
    }

    Ok(())
}

async fn report_failure(context: &str, response: reqwest::Response) -> Result<(), Box<dyn Error>> {
    eprintln!("{context}: {}", response.status());
    eprintln!("Response: {}", response.text().await?);
    std::process::exit(1);
}

mod api;
mod error;
mod poll;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use preview::bridge::Screenshot;
use preview::{MountPolicy, build_document};
use serde_json::Value;
use tracing::info;
use wire::api::{
    GenerateRequest, MANUAL_PATH, MenuCreate, ScreenCreate, TEST_PLAN_PATH, design_download_path, flatten_menus,
    markdown_filename, menu_path, resource_collection_path, resource_item_path, resource_list_path,
    screen_approve_path, screen_path,
};
use wire::catalog::ResourceKind;
use wire::status::DEFAULT_POLL_INTERVAL_MS;
use wire::{GenerateReply, Menu, PollPolicy, WizardData};

use crate::api::{ApiClient, Download};
use crate::error::CliError;
use crate::poll::{FollowOutcome, follow, progress_line};

#[derive(Parser, Debug)]
#[command(name = "forgeflow", about = "ForgeFlow prototype generation CLI")]
struct Cli {
    #[arg(long, env = "FORGEFLOW_API_BASE_URL", default_value = "http://localhost:8000")]
    base_url: String,

    /// Per-request timeout. Generation requests can take minutes.
    #[arg(long, env = "FORGEFLOW_TIMEOUT_SECS", default_value_t = 120)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check backend and model availability.
    Health,
    /// Start prototype generation for a screen.
    Generate(GenerateArgs),
    /// Show (or follow) generation status.
    Status(StatusArgs),
    Draft(DraftCommand),
    /// Write a standalone preview document for generated code.
    Preview(PreviewArgs),
    Doc(DocCommand),
    Resources(ResourcesCommand),
    /// List the menu tree, or create and delete folders and menus.
    Menus(MenusCommand),
    Screen(ScreenCommand),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    screen_id: i64,
    /// Defaults to the screen's menu name.
    #[arg(long)]
    menu_name: Option<String>,
    /// Defaults to the screen's own name.
    #[arg(long)]
    screen_name: Option<String>,
    /// Wizard data JSON file; defaults to the saved draft.
    #[arg(long)]
    wizard: Option<PathBuf>,
    #[arg(long)]
    prompt: Option<String>,
    /// Follow status until the job finishes.
    #[arg(long, default_value_t = false)]
    wait: bool,
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    interval_ms: u64,
}

#[derive(Args, Debug)]
struct StatusArgs {
    screen_id: i64,
    #[arg(long, default_value_t = false)]
    watch: bool,
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    interval_ms: u64,
}

#[derive(Args, Debug)]
struct DraftCommand {
    #[command(subcommand)]
    command: DraftSubcommand,
}

#[derive(Subcommand, Debug)]
enum DraftSubcommand {
    Get { screen_id: i64 },
    Put { screen_id: i64, file: PathBuf },
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Component source file, or - for stdin. Ignored with --screen.
    #[arg(long, conflicts_with = "screen", required_unless_present = "screen")]
    input: Option<String>,
    /// Use the stored prototype of this screen.
    #[arg(long)]
    screen: Option<i64>,
    #[arg(long, default_value = "preview.html")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct DocCommand {
    #[command(subcommand)]
    command: DocSubcommand,
}

#[derive(Subcommand, Debug)]
enum DocSubcommand {
    /// Generate the design document (.docx) with optional screenshots.
    Design {
        screen_id: i64,
        /// `LABEL=PATH` of a PNG; repeatable.
        #[arg(long = "screenshot")]
        screenshots: Vec<String>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Download the stored design document.
    Download {
        screen_id: i64,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    TestPlan(MarkdownDocArgs),
    Manual(MarkdownDocArgs),
}

#[derive(Args, Debug)]
struct MarkdownDocArgs {
    screen_id: i64,
    #[arg(long)]
    menu_name: Option<String>,
    #[arg(long)]
    screen_name: Option<String>,
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct ResourcesCommand {
    #[command(subcommand)]
    command: ResourcesSubcommand,
}

fn parse_kind(raw: &str) -> Result<ResourceKind, String> {
    ResourceKind::parse(raw).ok_or_else(|| format!("unknown resource kind `{raw}` (layouts, components, actions)"))
}

#[derive(Subcommand, Debug)]
enum ResourcesSubcommand {
    /// All three collections as the wizard sees them.
    Wizard,
    List {
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
        #[arg(long, default_value_t = false)]
        include_inactive: bool,
        #[arg(long)]
        category: Option<String>,
    },
    Get {
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
        id: String,
    },
    Create {
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
        #[arg(long)]
        data: String,
    },
    Update {
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
        id: String,
    },
}

#[derive(Args, Debug)]
struct ScreenCommand {
    #[command(subcommand)]
    command: ScreenSubcommand,
}

#[derive(Args, Debug)]
struct MenusCommand {
    /// Defaults to `list`.
    #[command(subcommand)]
    command: Option<MenusSubcommand>,
}

#[derive(Subcommand, Debug)]
enum MenusSubcommand {
    List,
    /// Create a top-level folder, or a menu inside `--parent`.
    Create {
        name: String,
        /// Folder to create the menu in.
        #[arg(long)]
        parent: Option<i64>,
    },
    Delete { menu_id: i64 },
}

#[derive(Subcommand, Debug)]
enum ScreenSubcommand {
    Get { screen_id: i64 },
    /// Create a screen under a menu. The name defaults to the menu's.
    Create {
        menu_id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Approve { screen_id: i64 },
    Delete { screen_id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_target(false).init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.base_url, cli.timeout_secs)?;
    match cli.command {
        Command::Health => run_health(&client).await,
        Command::Generate(args) => run_generate(&client, args).await,
        Command::Status(args) => run_status(&client, args).await,
        Command::Draft(draft) => run_draft(&client, draft).await,
        Command::Preview(args) => run_preview(&client, args).await,
        Command::Doc(doc) => run_doc(&client, doc).await,
        Command::Resources(resources) => run_resources(&client, resources).await,
        Command::Menus(menus) => run_menus(&client, menus).await,
        Command::Screen(screen) => run_screen(&client, screen).await,
    }
}

async fn run_health(client: &ApiClient) -> Result<(), CliError> {
    let health = client.health().await?;
    println!("{} (model: {})", health.status, health.model);
    Ok(())
}

// =============================================================================
// GENERATION
// =============================================================================

async fn run_generate(client: &ApiClient, args: GenerateArgs) -> Result<(), CliError> {
    let (menu_name, screen_name) = resolve_names(client, args.screen_id, args.menu_name, args.screen_name).await?;
    let wizard_data = match &args.wizard {
        Some(path) => Some(read_wizard_file(path)?),
        None => client.load_draft(args.screen_id).await?.restorable().cloned(),
    };
    let request = GenerateRequest { screen_id: args.screen_id, prompt: args.prompt, wizard_data, menu_name, screen_name };

    match client.generate(&request).await? {
        GenerateReply::Started(ack) => {
            info!(screen_id = ack.screen_id, cleared = ack.previous_prototype_cleared, "generation started");
            println!("{}", if ack.message.is_empty() { "generation started" } else { ack.message.as_str() });
        }
        GenerateReply::Finished(resp) => {
            // Older backends generate synchronously; nothing left to follow.
            let size = resp.prototype_html.as_deref().map_or(0, str::len);
            println!("prototype generated ({size} bytes)");
            return Ok(());
        }
    }

    if args.wait {
        follow_to_end(client, args.screen_id, args.interval_ms).await?;
    }
    Ok(())
}

async fn run_status(client: &ApiClient, args: StatusArgs) -> Result<(), CliError> {
    if args.watch {
        return follow_to_end(client, args.screen_id, args.interval_ms).await;
    }
    let status = client.status(args.screen_id).await?;
    println!("{}", progress_line(&status));
    Ok(())
}

async fn follow_to_end(client: &ApiClient, screen_id: i64, interval_ms: u64) -> Result<(), CliError> {
    let policy = PollPolicy { interval: Duration::from_millis(interval_ms), ..PollPolicy::default() };
    match follow(client, screen_id, policy, |status| println!("{}", progress_line(status))).await {
        FollowOutcome::Completed(_) => Ok(()),
        FollowOutcome::Failed(message) => {
            Err(CliError::GenerationFailed(message.unwrap_or_else(|| "no reason given".to_owned())))
        }
    }
}

/// Fills in menu and screen names from the backend when not given.
async fn resolve_names(
    client: &ApiClient,
    screen_id: i64,
    menu_name: Option<String>,
    screen_name: Option<String>,
) -> Result<(String, String), CliError> {
    if let (Some(menu), Some(screen)) = (&menu_name, &screen_name) {
        return Ok((menu.clone(), screen.clone()));
    }
    let screen = client.screen(screen_id).await?;
    let menu = match menu_name {
        Some(name) => name,
        None => client.get::<Menu>(&menu_path(screen.menu_id)).await?.name,
    };
    Ok((menu, screen_name.unwrap_or(screen.name)))
}

// =============================================================================
// DRAFTS AND PREVIEW
// =============================================================================

async fn run_draft(client: &ApiClient, draft: DraftCommand) -> Result<(), CliError> {
    match draft.command {
        DraftSubcommand::Get { screen_id } => {
            let draft = client.load_draft(screen_id).await?;
            match draft.restorable() {
                Some(data) => print_json(&serde_json::to_value(data)?),
                None => {
                    println!("no draft saved for screen {screen_id}");
                    Ok(())
                }
            }
        }
        DraftSubcommand::Put { screen_id, file } => {
            let data = read_wizard_file(&file)?;
            let saved = client.save_draft(screen_id, &data).await?;
            println!("draft saved ({} bytes)", saved.data_size);
            Ok(())
        }
    }
}

async fn run_preview(client: &ApiClient, args: PreviewArgs) -> Result<(), CliError> {
    let source = match (args.screen, args.input.as_deref()) {
        (Some(screen_id), _) => client
            .screen(screen_id)
            .await?
            .prototype_html
            .filter(|code| !code.trim().is_empty())
            .ok_or(CliError::MissingPrototype(screen_id))?,
        (None, Some("-") | None) => std::io::read_to_string(std::io::stdin()).map_err(|e| CliError::io("<stdin>", e))?,
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?,
    };

    let document = build_document(&source, &MountPolicy::default());
    write_file(&args.output, document.html.as_bytes())?;
    info!(component = %document.component_name, key = %document.content_key, "preview written");
    println!("{} ({})", args.output.display(), document.component_name);
    Ok(())
}

// =============================================================================
// DOCUMENTS
// =============================================================================

async fn run_doc(client: &ApiClient, doc: DocCommand) -> Result<(), CliError> {
    match doc.command {
        DocSubcommand::Design { screen_id, screenshots, out_dir } => {
            let shots = screenshots.iter().map(|arg| load_screenshot(arg)).collect::<Result<Vec<_>, _>>()?;
            let screen = client.screen(screen_id).await?;
            let download = client.design_document(screen_id, &screen.name, shots).await?;
            save_download(&out_dir, &download)
        }
        DocSubcommand::Download { screen_id, out_dir } => {
            let screen = client.screen(screen_id).await?;
            let download = client.download_path(&design_download_path(screen_id), &screen.name).await?;
            save_download(&out_dir, &download)
        }
        DocSubcommand::TestPlan(args) => markdown_document(client, TEST_PLAN_PATH, "test_plan", args).await,
        DocSubcommand::Manual(args) => markdown_document(client, MANUAL_PATH, "manual", args).await,
    }
}

async fn markdown_document(
    client: &ApiClient,
    path: &str,
    kind: &'static str,
    args: MarkdownDocArgs,
) -> Result<(), CliError> {
    let (menu_name, screen_name) = resolve_names(client, args.screen_id, args.menu_name, args.screen_name).await?;
    let request = GenerateRequest {
        screen_id: args.screen_id,
        prompt: None,
        wizard_data: None,
        menu_name,
        screen_name: screen_name.clone(),
    };
    let response = client.generate_document(path, &request).await?;
    let text = response.document_text().ok_or(CliError::EmptyDocument(kind))?;
    let target = args.out_dir.join(markdown_filename(&screen_name, kind));
    write_file(&target, text.as_bytes())?;
    println!("{}", target.display());
    Ok(())
}

fn load_screenshot(arg: &str) -> Result<Screenshot, CliError> {
    let (label, path) = parse_screenshot_arg(arg)?;
    let png = std::fs::read(&path).map_err(|e| CliError::io(&path, e))?;
    Ok(Screenshot { label, png })
}

fn parse_screenshot_arg(arg: &str) -> Result<(String, PathBuf), CliError> {
    let (label, path) = arg.split_once('=').ok_or_else(|| CliError::InvalidScreenshot(arg.to_owned()))?;
    let (label, path) = (label.trim(), path.trim());
    if label.is_empty() || path.is_empty() {
        return Err(CliError::InvalidScreenshot(arg.to_owned()));
    }
    Ok((label.to_owned(), PathBuf::from(path)))
}

fn save_download(out_dir: &Path, download: &Download) -> Result<(), CliError> {
    let target = out_dir.join(&download.filename);
    write_file(&target, &download.bytes)?;
    println!("{} ({} bytes)", target.display(), download.bytes.len());
    Ok(())
}

// =============================================================================
// CATALOG, MENUS, SCREENS
// =============================================================================

async fn run_resources(client: &ApiClient, resources: ResourcesCommand) -> Result<(), CliError> {
    let json = match resources.command {
        ResourcesSubcommand::Wizard => {
            client.request(reqwest::Method::GET, wire::api::WIZARD_RESOURCES_PATH, None).await?
        }
        ResourcesSubcommand::List { kind, include_inactive, category } => {
            let path = resource_list_path(kind, include_inactive, category.as_deref());
            client.request(reqwest::Method::GET, &path, None).await?
        }
        ResourcesSubcommand::Get { kind, id } => {
            client.request(reqwest::Method::GET, &resource_item_path(kind, &id), None).await?
        }
        ResourcesSubcommand::Create { kind, data } => {
            let body = serde_json::from_str::<Value>(&data)?;
            client.request(reqwest::Method::POST, &resource_collection_path(kind), Some(body)).await?
        }
        ResourcesSubcommand::Update { kind, id, data } => {
            let body = serde_json::from_str::<Value>(&data)?;
            client.request(reqwest::Method::PUT, &resource_item_path(kind, &id), Some(body)).await?
        }
        ResourcesSubcommand::Delete { kind, id } => {
            client.request(reqwest::Method::DELETE, &resource_item_path(kind, &id), None).await?
        }
    };
    print_json(&json)
}

async fn run_menus(client: &ApiClient, menus: MenusCommand) -> Result<(), CliError> {
    match menus.command.unwrap_or(MenusSubcommand::List) {
        MenusSubcommand::List => {
            let tree = client.menus().await?;
            for line in menu_tree_lines(&tree) {
                println!("{line}");
            }
            Ok(())
        }
        MenusSubcommand::Create { name, parent } => {
            let body = match parent {
                Some(parent_id) => MenuCreate::child(&name, &client.menu(parent_id).await?.menu)?,
                None => MenuCreate::folder(&name, &client.menus().await?)?,
            };
            let created = client.create_menu(&body).await?;
            info!(menu_id = created.id, folder = created.is_folder, "menu created");
            println!("{} [{}]", created.name, created.id);
            Ok(())
        }
        MenusSubcommand::Delete { menu_id } => {
            client.request(reqwest::Method::DELETE, &menu_path(menu_id), None).await?;
            println!("menu {menu_id} deleted");
            Ok(())
        }
    }
}

fn menu_tree_lines(tree: &[Menu]) -> Vec<String> {
    flatten_menus(tree)
        .into_iter()
        .map(|(depth, menu)| {
            let marker = if menu.is_folder { "+" } else { "-" };
            format!("{}{marker} {} [{}]", "  ".repeat(depth), menu.name, menu.id)
        })
        .collect()
}

/// Name and description given on the command line, else the menu's defaults.
fn screen_create_body(menu: &Menu, name: Option<&str>, description: Option<&str>) -> Result<ScreenCreate, CliError> {
    let defaults = ScreenCreate::for_menu(menu);
    let name = name.unwrap_or(defaults.name.as_str());
    let description = description.or(defaults.description.as_deref()).unwrap_or_default();
    Ok(ScreenCreate::new(menu.id, name, description)?)
}

async fn run_screen(client: &ApiClient, screen: ScreenCommand) -> Result<(), CliError> {
    let json = match screen.command {
        ScreenSubcommand::Get { screen_id } => serde_json::to_value(client.screen(screen_id).await?)?,
        ScreenSubcommand::Create { menu_id, name, description } => {
            let menu = client.menu(menu_id).await?.menu;
            let body = screen_create_body(&menu, name.as_deref(), description.as_deref())?;
            let created = client.create_screen(&body).await?;
            info!(screen_id = created.id, menu_id = created.menu_id, "screen created");
            serde_json::to_value(created)?
        }
        ScreenSubcommand::Delete { screen_id } => {
            client.request(reqwest::Method::DELETE, &screen_path(screen_id), None).await?;
            println!("screen {screen_id} deleted");
            return Ok(());
        }
        ScreenSubcommand::Approve { screen_id } => {
            client.request(reqwest::Method::POST, &screen_approve_path(screen_id), None).await?
        }
    };
    print_json(&json)
}

// =============================================================================
// HELPERS
// =============================================================================

fn read_wizard_file(path: &Path) -> Result<WizardData, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, bytes).map_err(|e| CliError::io(path, e))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

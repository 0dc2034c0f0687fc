use clap::Parser;
use media_fs::ListOptions;
use media_tags::TagService;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
    transport::stdio,
    ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod favorites;
mod tools;

use config::Config;
use favorites::FavoritesStore;

#[derive(Parser, Debug)]
#[command(name = "meme-folder")]
#[command(about = "MCP server for browsing and tagging local meme folders")]
struct Cli {
    /// Directory holding meme-folder-config.json (overrides MEME_FOLDER_CONFIG_DIR)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

/// Parameters for the ListDir tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListDirParams {
    /// Absolute path of the folder to list
    pub path: String,
}

/// Parameters for the GetAllTags tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FolderParams {
    /// Absolute path of the folder holding the media files
    #[serde(rename = "folderPath")]
    pub folder_path: String,
}

/// Parameters for the GetImageTags tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ImageParams {
    /// Absolute path of the folder holding the media file
    #[serde(rename = "folderPath")]
    pub folder_path: String,
    /// File name within the folder (no path separators)
    #[serde(rename = "imageName")]
    pub image_name: String,
}

/// Parameters for the AddImageTag and RemoveImageTag tools
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ImageTagParams {
    /// Absolute path of the folder holding the media file
    #[serde(rename = "folderPath")]
    pub folder_path: String,
    /// File name within the folder (no path separators)
    #[serde(rename = "imageName")]
    pub image_name: String,
    /// Tag text, stored verbatim
    pub tag: String,
}

/// Parameters for the SetImageTags tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetImageTagsParams {
    /// Absolute path of the folder holding the media file
    #[serde(rename = "folderPath")]
    pub folder_path: String,
    /// File name within the folder (no path separators)
    #[serde(rename = "imageName")]
    pub image_name: String,
    /// Complete tag list. An empty list removes the file's record.
    pub tags: Vec<String>,
}

/// Parameters for the AddFavorite tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddFavoriteParams {
    /// Absolute path of the folder to favorite
    pub path: String,
    /// Display name for the favorite
    pub name: String,
    /// RFC 3339 timestamp (defaults to now)
    #[serde(default, rename = "addedAt")]
    pub added_at: Option<String>,
}

/// Parameters for the RemoveFavorite tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RemoveFavoriteParams {
    /// Path of the favorite to remove
    pub path: String,
}

#[derive(Clone)]
pub struct MemeFolderServer {
    list_options: ListOptions,
    tags: Arc<TagService>,
    favorites: Arc<FavoritesStore>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MemeFolderServer {
    pub fn new(config: &Config) -> Result<Self, config::ConfigError> {
        let favorites_path = config.config_file_path()?;
        tracing::info!("Favorites file: {}", favorites_path.display());

        Ok(Self {
            list_options: config.list_options(),
            tags: Arc::new(TagService::with_file_store()),
            favorites: Arc::new(FavoritesStore::new(favorites_path)),
            tool_router: Self::tool_router(),
        })
    }

    #[tool(description = "List the folders, images and videos in a folder. Returns a JSON array of { name, type, size, modified } sorted by name. Non-media files are skipped, as are media files over the configured size ceilings.")]
    async fn list_dir(&self, params: Parameters<ListDirParams>) -> Result<CallToolResult, ErrorData> {
        tools::list_dir::execute(&params.0.path, &self.list_options).await
    }

    #[tool(description = "Get the current user's home directory.")]
    async fn get_home_directory(&self) -> Result<CallToolResult, ErrorData> {
        tools::list_dir::home_directory()
    }

    #[tool(description = "Get the tags of a media file. Tags follow the file's content, so a renamed file keeps its tags. Returns a JSON array of strings.")]
    async fn get_image_tags(&self, params: Parameters<ImageParams>) -> Result<CallToolResult, ErrorData> {
        tools::get_image_tags::execute(&self.tags, &params.0.folder_path, &params.0.image_name).await
    }

    #[tool(description = "Get every tagged file in a folder. Returns a JSON object mapping file names to tag arrays.")]
    async fn get_all_tags(&self, params: Parameters<FolderParams>) -> Result<CallToolResult, ErrorData> {
        tools::get_all_tags::execute(&self.tags, &params.0.folder_path).await
    }

    #[tool(description = "Add a tag to a media file. Adding a tag the file already has does nothing.")]
    async fn add_image_tag(&self, params: Parameters<ImageTagParams>) -> Result<CallToolResult, ErrorData> {
        tools::add_image_tag::execute(
            &self.tags,
            &params.0.folder_path,
            &params.0.image_name,
            &params.0.tag,
        )
        .await
    }

    #[tool(description = "Remove a tag from a media file. Removing the last tag forgets the file.")]
    async fn remove_image_tag(&self, params: Parameters<ImageTagParams>) -> Result<CallToolResult, ErrorData> {
        tools::remove_image_tag::execute(
            &self.tags,
            &params.0.folder_path,
            &params.0.image_name,
            &params.0.tag,
        )
        .await
    }

    #[tool(description = "Replace all tags of a media file. Tags are stored as given, including duplicates. An empty list clears the file's tags.")]
    async fn set_image_tags(&self, params: Parameters<SetImageTagsParams>) -> Result<CallToolResult, ErrorData> {
        tools::set_image_tags::execute(
            &self.tags,
            &params.0.folder_path,
            &params.0.image_name,
            params.0.tags,
        )
        .await
    }

    #[tool(description = "List favorite folders in the order they were added. Returns a JSON array of { path, name, addedAt }.")]
    async fn get_favorites(&self) -> Result<CallToolResult, ErrorData> {
        tools::favorites::list(&self.favorites).await
    }

    #[tool(description = "Add a folder to favorites. A folder that is already a favorite is left unchanged.")]
    async fn add_favorite(&self, params: Parameters<AddFavoriteParams>) -> Result<CallToolResult, ErrorData> {
        tools::favorites::add(
            &self.favorites,
            &params.0.path,
            &params.0.name,
            params.0.added_at.as_deref(),
        )
        .await
    }

    #[tool(description = "Remove a folder from favorites.")]
    async fn remove_favorite(&self, params: Parameters<RemoveFavoriteParams>) -> Result<CallToolResult, ErrorData> {
        tools::favorites::remove(&self.favorites, &params.0.path).await
    }

    #[tool(description = "Get the path of the favorites config file.")]
    async fn get_config_path(&self) -> Result<CallToolResult, ErrorData> {
        tools::favorites::config_path(&self.favorites)
    }
}

#[tool_handler]
impl rmcp::ServerHandler for MemeFolderServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "meme-folder".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Meme Folder MCP server - browse local media folders, tag images and videos, and keep favorite folders."
                    .into(),
            ),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Respects RUST_LOG, defaults to info (or debug with --verbose)
    let default_filter = if cli.verbose {
        "meme_folder=debug,media_tags=debug,media_fs=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = Config::from_env()?.with_config_dir(cli.config_dir);
    let server = MemeFolderServer::new(&config)?;

    // Run the server with STDIO transport
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error starting server: {}", e);
    })?;

    tracing::info!("Meme Folder MCP server started");
    service.waiting().await?;

    Ok(())
}

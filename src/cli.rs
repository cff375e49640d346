//! CLI handler for processing commands

use std::path::PathBuf;
use std::sync::Arc;

use dialoguer::Confirm;

use crate::client::{CatApi, HttpClient};
use crate::config::{default_config_path, Config};
use crate::error::Result;
use crate::service::CatService;
use crate::ui::{create_upload_bar, Ui};
use crate::upload::UploadFile;
use crate::votes::format_score;
use crate::{Commands, ConfigCommand, DeleteArgs, IdArgs, UnfavouriteArgs, UploadArgs};

/// CLI handler dispatching each subcommand to the service layer
pub struct CliHandler {
    config_path: Option<PathBuf>,
    ui: Ui,
}

impl CliHandler {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            ui: Ui::new(),
        }
    }

    fn load_config(&self) -> Result<Config> {
        match &self.config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    fn build_service(&self) -> Result<CatService<HttpClient>> {
        let config = self.load_config()?;
        let list_limit = config.list_limit;
        let client = HttpClient::new(config)?;
        Ok(CatService::new(Arc::new(client), list_limit))
    }

    /// Execute a CLI command
    pub async fn execute(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::List => self.handle_list().await,
            Commands::Votes => self.handle_votes().await,
            Commands::Upvote(args) => self.handle_upvote(args).await,
            Commands::Downvote(args) => self.handle_downvote(args).await,
            Commands::Delete(args) => self.handle_delete(args).await,
            Commands::Favourite(args) => self.handle_favourite(args).await,
            Commands::Unfavourite(args) => self.handle_unfavourite(args).await,
            Commands::Upload(args) => self.handle_upload(args).await,
            Commands::Status => self.handle_status().await,
            Commands::Config(args) => self.handle_config(args).await,
        }
    }

    /// Handle list command - images with scores and favourite markers
    async fn handle_list(&mut self) -> Result<()> {
        let service = self.build_service()?;
        let cats = service.cats().await?;

        if cats.is_empty() {
            self.ui.info("No cats yet. Upload one with: cattery upload <FILE>");
            return Ok(());
        }

        let tally = service.votes().await?;

        self.ui.separator();
        for cat in &cats {
            let marker = match &cat.favourite {
                Some(fav) => format!("♥ (favourite {})", fav.id),
                None => String::new(),
            };
            println!(
                "{:<12} {:>4}  {} {}",
                cat.id,
                format_score(tally.score(&cat.id)),
                cat.url,
                marker
            );
        }
        self.ui.separator();
        println!("{} cats", cats.len());
        Ok(())
    }

    /// Handle votes command - aggregated score table
    async fn handle_votes(&mut self) -> Result<()> {
        let service = self.build_service()?;
        let tally = service.votes().await?;

        if tally.is_empty() {
            self.ui.info("No votes have been cast yet.");
            return Ok(());
        }

        for (image_id, score) in tally.entries() {
            println!("{:<12} {:>4}", image_id, format_score(score));
        }
        Ok(())
    }

    async fn handle_upvote(&mut self, args: IdArgs) -> Result<()> {
        let service = self.build_service()?;
        service.upvote(&args.image_id).await?;
        let tally = service.votes().await?;
        self.ui.success(&format!(
            "Upvoted {} (score {})",
            args.image_id,
            format_score(tally.score(&args.image_id))
        ));
        Ok(())
    }

    async fn handle_downvote(&mut self, args: IdArgs) -> Result<()> {
        let service = self.build_service()?;
        service.downvote(&args.image_id).await?;
        let tally = service.votes().await?;
        self.ui.success(&format!(
            "Downvoted {} (score {})",
            args.image_id,
            format_score(tally.score(&args.image_id))
        ));
        Ok(())
    }

    /// Handle delete command - confirms unless --force
    async fn handle_delete(&mut self, args: DeleteArgs) -> Result<()> {
        if !args.force {
            let confirmed = Confirm::new()
                .with_prompt(format!("Delete image {}? This cannot be undone", args.image_id))
                .default(false)
                .interact()?;
            if !confirmed {
                self.ui.info("Aborted.");
                return Ok(());
            }
        }

        let service = self.build_service()?;
        service.delete(&args.image_id).await?;
        self.ui.success(&format!("Deleted {}", args.image_id));
        Ok(())
    }

    async fn handle_favourite(&mut self, args: IdArgs) -> Result<()> {
        let service = self.build_service()?;
        service.favourite(&args.image_id).await?;
        self.ui.success(&format!("Favourited {}", args.image_id));
        Ok(())
    }

    async fn handle_unfavourite(&mut self, args: UnfavouriteArgs) -> Result<()> {
        let service = self.build_service()?;
        service.unfavourite(args.favourite_id).await?;
        self.ui
            .success(&format!("Removed favourite {}", args.favourite_id));
        Ok(())
    }

    /// Handle upload command - validates locally, then posts the file
    async fn handle_upload(&mut self, args: UploadArgs) -> Result<()> {
        let file = match UploadFile::from_path(&args.path).await {
            Ok(file) => file,
            Err(e) if e.is_validation_error() => {
                // Inline validation report; nothing was sent.
                self.ui.error(&e.to_string());
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        self.ui.info(&format!(
            "Uploading {} ({})",
            file.filename,
            file.kind.mime_type()
        ));

        let service = self.build_service()?;
        let bar = create_upload_bar("Uploading...");
        let result = service.upload(file).await;
        bar.finish_and_clear();

        result?;
        self.ui.success("Picture uploaded.");
        Ok(())
    }

    /// Handle status command - config summary and connectivity check
    async fn handle_status(&mut self) -> Result<()> {
        let config = self.load_config()?;

        let connectivity = match HttpClient::new(config.clone()) {
            Ok(client) => match client.list_images(1).await {
                Ok(_) => self.ui.format_server_status(true),
                Err(e) => format!("{} ({})", self.ui.format_server_status(false), e),
            },
            Err(e) => format!("{} ({})", self.ui.format_server_status(false), e),
        };

        self.ui.card(
            "Status",
            vec![
                ("Endpoint", config.endpoint.clone()),
                ("Timeout", format!("{}s", config.timeout)),
                ("List limit", config.list_limit.to_string()),
                (
                    "API key",
                    if config.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
                        "configured".to_string()
                    } else {
                        "missing".to_string()
                    },
                ),
                ("Server", connectivity),
            ],
        );
        Ok(())
    }

    /// Handle config command
    async fn handle_config(&mut self, command: ConfigCommand) -> Result<()> {
        let path = self
            .config_path
            .clone()
            .unwrap_or_else(default_config_path);

        match command {
            ConfigCommand::Show => {
                let config = self.load_config()?;
                self.ui.card(
                    "Configuration",
                    vec![
                        ("Endpoint", config.endpoint.clone()),
                        ("Timeout", format!("{}s", config.timeout)),
                        ("List limit", config.list_limit.to_string()),
                        ("Config file", path.display().to_string()),
                    ],
                );
            }
            ConfigCommand::SetEndpoint { url } => {
                let mut config = self.load_config()?;
                config.endpoint = url;
                config.validate()?;
                config.save(&path).await?;
                self.ui.success("Endpoint updated.");
            }
            ConfigCommand::SetTimeout { seconds } => {
                let mut config = self.load_config()?;
                config.timeout = seconds;
                config.save(&path).await?;
                self.ui.success("Timeout updated.");
            }
            ConfigCommand::Reset => {
                Config::default().save(&path).await?;
                self.ui.success("Configuration reset to defaults.");
            }
        }
        Ok(())
    }
}

//! Bot assembly and the teloxide dispatcher.

use crate::handler::{handle_callback, handle_message};
use crate::{
    AccessControl, AlbumAssembler, BotApiMaterializer, BotRelay, DeletionProtocol,
    GalleriaConfig, IntakeMode, IntakeStrategy, MediaIntake, Router,
};
use galleria_error::{ConfigError, GalleriaResult};
use galleria_storage::{KvStore, Publisher};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, instrument};

/// The running bot: Telegram client plus every component an update can touch.
pub struct GalleriaBot {
    pub(crate) bot: Bot,
    pub(crate) access: AccessControl,
    pub(crate) router: Router,
}

impl GalleriaBot {
    /// Assemble a bot from its parts.
    pub fn new(bot: Bot, access: AccessControl, router: Router) -> Self {
        Self {
            bot,
            access,
            router,
        }
    }

    /// Build a bot from configuration, publishing into `store`.
    #[instrument(skip_all, fields(intake = %config.intake.mode()))]
    pub fn from_config(config: &GalleriaConfig, store: Arc<dyn KvStore>) -> GalleriaResult<Self> {
        let token = config.telegram.token.clone();
        let mode = config.intake.mode();

        let bot = match mode {
            IntakeMode::Direct => {
                let url = reqwest::Url::parse(&config.intake.local_api_url).map_err(|e| {
                    ConfigError::invalid("intake.local_api_url", format!("not a URL: {}", e))
                })?;
                Bot::new(&token).set_api_url(url)
            }
            IntakeMode::Relay | IntakeMode::Inline => Bot::new(&token),
        };

        let strategy = match mode {
            IntakeMode::Direct => IntakeStrategy::Direct {
                materializer: Arc::new(BotApiMaterializer::new(bot.clone(), &token)),
                public_root: config.intake.public_download_root.clone(),
                credential: token.clone(),
            },
            IntakeMode::Relay => IntakeStrategy::Relay {
                relay: Arc::new(BotRelay::new(bot.clone())),
                channel_id: config.intake.relay_channel_id,
                link_prefix: config.intake.relay_link_prefix.clone(),
            },
            IntakeMode::Inline => IntakeStrategy::Inline,
        };

        let publisher = Publisher::new(
            store.clone(),
            &config.publish.code_prefix,
            &config.publish.worker_base_url,
        );
        let assembler = AlbumAssembler::new(
            MediaIntake::new(strategy),
            publisher,
            config.publish.category_list(),
            &config.publish.default_title,
        );
        let access = AccessControl::new(
            config.telegram.owner_id,
            config.telegram.allowed_users.iter().copied(),
        );

        info!(
            categories = assembler.categories().len(),
            allowed = access.list().len(),
            "Bot configured"
        );
        let router = Router::new(assembler, DeletionProtocol::new(store));
        Ok(Self::new(bot, access, router))
    }

    /// Long-poll for updates until Ctrl-C.
    pub async fn run(self: Arc<Self>) {
        let handler = dptree::entry()
            .branch(Update::filter_message().endpoint(handle_message))
            .branch(Update::filter_callback_query().endpoint(handle_callback));

        info!(intake = %self.router.assembler().intake().mode(), "Starting update dispatcher");

        Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![self])
            .default_handler(|_upd| async {})
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Update dispatcher stopped");
    }
}

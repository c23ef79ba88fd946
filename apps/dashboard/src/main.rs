mod config;
mod demo;
mod render;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use client_core::{
    create_campaign, derive_view_from_state, require_subject, ApplicationStatusPage,
    CampaignSummary, CampaignsPage, DocumentSource, EditError, FilterCriteria, HttpDocumentSource,
    LoadState, PageDataController, ProfilePage, SessionIdentity, StatusFilter,
};
use shared::{
    domain::{ApplicationId, CampaignCategory, CampaignStatus, SubjectId},
    records::CampaignDraft,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Brand dashboard over the remote document store")]
struct Args {
    #[arg(long, default_value = "dashboard.toml")]
    config: PathBuf,
    #[arg(long)]
    store_url: Option<String>,
    /// Subject to act as; overrides `subject_id` from the config.
    #[arg(long)]
    subject: Option<String>,
    /// Serve everything from a seeded in-memory store.
    #[arg(long)]
    demo: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List campaigns, optionally narrowed by search text and status.
    Campaigns {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Totals and derived metrics across all campaigns.
    Summary,
    /// Profile greeting next to the campaign overview.
    Overview,
    /// Status of one application.
    Application { id: String },
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    CreateCampaign {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        target_amount: f64,
        /// YYYY-MM-DD
        #[arg(long)]
        deadline: String,
        #[arg(long)]
        category: String,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    Show,
    Edit {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(&args.config)?;
    if let Some(url) = args.store_url {
        settings.store_url = url;
    }

    let source: Arc<dyn DocumentSource> = if args.demo {
        info!("dashboard: using seeded in-memory store");
        Arc::new(demo::seeded_store())
    } else {
        info!(store_url = %settings.store_url, "dashboard: using remote store");
        Arc::new(HttpDocumentSource::new(
            &settings.store_url,
            Duration::from_secs(settings.request_timeout_secs),
        )?)
    };

    let subject = args
        .subject
        .or(settings.subject_id)
        .or_else(|| args.demo.then(|| demo::DEMO_SUBJECT.to_string()));
    let identity = Arc::new(match subject {
        Some(subject) => SessionIdentity::signed_in(SubjectId::new(subject)),
        None => SessionIdentity::default(),
    });

    match args.command {
        Command::Campaigns { search, status } => {
            let status: StatusFilter<CampaignStatus> =
                status.parse().map_err(|e: String| anyhow!(e))?;
            let criteria = FilterCriteria::new(search, status);
            let controller = PageDataController::new(CampaignsPage, source);
            let state = controller.load(()).await;
            ready("campaigns", &state)?;
            let visible = derive_view_from_state(&state, &criteria);
            print!("{}", render::campaign_list(&visible, &criteria));
        }
        Command::Summary => {
            let controller = PageDataController::new(CampaignsPage, source);
            let state = controller.load(()).await;
            let campaigns = ready("campaigns", &state)?;
            print!("{}", render::summary(&CampaignSummary::from_campaigns(campaigns)));
        }
        Command::Overview => overview(source, identity).await?,
        Command::Application { id } => {
            let controller = PageDataController::new(ApplicationStatusPage, source);
            let state = controller.load(ApplicationId::new(id)).await;
            print!("{}", render::application(ready("application", &state)?));
        }
        Command::Profile { action } => profile(source, identity, action).await?,
        Command::CreateCampaign {
            title,
            description,
            target_amount,
            deadline,
            category,
        } => {
            let deadline = NaiveDate::parse_from_str(&deadline, "%Y-%m-%d")
                .with_context(|| format!("invalid deadline '{deadline}', expected YYYY-MM-DD"))?;
            let category = CampaignCategory::parse(&category)
                .ok_or_else(|| anyhow!("unknown category '{category}'"))?;
            let draft = CampaignDraft {
                title,
                description,
                target_amount,
                deadline: Some(deadline),
                category: Some(category),
            };
            let id = create_campaign(source.as_ref(), &draft, Local::now().date_naive()).await?;
            println!("Created campaign {id}");
        }
    }

    Ok(())
}

/// Payload of a settled load, or the page's error message as a failure.
fn ready<'a, T>(page: &str, state: &'a LoadState<T>) -> Result<&'a T> {
    match state {
        LoadState::Ready(payload) => Ok(payload),
        LoadState::Failed(message) => {
            bail!("{page} failed to load: {message}; run the command again to reload")
        }
        other => bail!("{page} did not finish loading ({})", other.label()),
    }
}

async fn overview(source: Arc<dyn DocumentSource>, identity: Arc<SessionIdentity>) -> Result<()> {
    let campaigns = PageDataController::new(CampaignsPage, source.clone());
    let profiles = PageDataController::new(ProfilePage::new(identity.clone()), source);

    let profile_load = async {
        match require_subject(identity.as_ref()) {
            Ok(subject) => profiles.load(subject).await,
            Err(err) => LoadState::Failed(err.to_string()),
        }
    };
    let (campaign_state, profile_state) = futures::join!(campaigns.load(()), profile_load);

    let summary = ready("campaigns", &campaign_state)
        .map(|campaigns| CampaignSummary::from_campaigns(campaigns))
        .map_err(|e| e.to_string());
    let profile = ready("profile", &profile_state).map_err(|e| e.to_string());

    print!(
        "{}",
        render::overview(
            profile.as_ref().copied().map_err(String::as_str),
            summary.as_ref().map_err(String::as_str),
        )
    );
    Ok(())
}

async fn profile(
    source: Arc<dyn DocumentSource>,
    identity: Arc<SessionIdentity>,
    action: ProfileAction,
) -> Result<()> {
    let subject = require_subject(identity.as_ref())?;
    let controller = PageDataController::new(ProfilePage::new(identity.clone()), source);
    let state = controller.load(subject).await;
    let loaded = ready("profile", &state)?;

    let (name, email, bio, avatar) = match action {
        ProfileAction::Show => {
            print!("{}", render::profile(loaded));
            return Ok(());
        }
        ProfileAction::Edit {
            name,
            email,
            bio,
            avatar,
        } => (name, email, bio, avatar),
    };

    controller.begin_edit().await?;
    controller
        .update_working(|profile| {
            if let Some(v) = name {
                profile.name = v;
            }
            if let Some(v) = email {
                profile.email = v;
            }
            if let Some(v) = bio {
                profile.bio = v;
            }
            if let Some(v) = avatar {
                profile.avatar = v;
            }
        })
        .await?;

    match controller.commit_edit().await {
        Ok(saved) => {
            println!("Profile saved.");
            print!("{}", render::profile(&saved));
            Ok(())
        }
        Err(EditError::Save(err)) => {
            if let Some(session) = controller.edit_session().await {
                print!("{}", render::profile_edit_failed(&session));
            }
            let hint = err.retry_hint();
            Err(anyhow!(err).context(format!("profile save failed. {hint}")))
        }
        Err(err) => Err(err.into()),
    }
}

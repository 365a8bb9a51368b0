//! Generate command - ask the chat backend for a travel plan

use std::path::PathBuf;

use clap::Args;
use koreplan_api::{prompts, ChatClient, PlanService, TripPreferences};
use koreplan_core::{Config, PlanRenderer, PlanSession, RenderOptions};

use super::{plan_kind, write_output};

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Budget in USD
    #[arg(short, long)]
    pub budget: Option<String>,

    /// Trip length in days
    #[arg(short, long)]
    pub duration: Option<String>,

    /// Travel style (Luxury, Moderate, Budget)
    #[arg(short, long)]
    pub style: Option<String>,

    /// Interests, comma separated or repeated
    #[arg(short, long = "interest", value_delimiter = ',')]
    pub interests: Vec<String>,

    /// Food preferences
    #[arg(long)]
    pub food: Option<String>,

    /// Accommodation type
    #[arg(long)]
    pub accommodation: Option<String>,

    /// Travel season
    #[arg(long)]
    pub season: Option<String>,

    /// Generate the bilingual immigration plan
    #[arg(long)]
    pub korean: bool,

    /// Dry run - print the prompt without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Write the plan text as returned, without rendering
    #[arg(long)]
    pub raw: bool,

    /// Output file (defaults to standard output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    fn preferences(&self) -> TripPreferences {
        TripPreferences {
            budget: self.budget.clone(),
            duration: self.duration.clone(),
            travel_style: self.style.clone(),
            interests: self.interests.clone(),
            food_preferences: self.food.clone(),
            accommodation: self.accommodation.clone(),
            season: self.season.clone(),
        }
    }

    /// Execute the generate command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let kind = plan_kind(self.korean);
        let prefs = self.preferences();

        if verbose {
            tracing::info!(kind = %kind, cache_key = %prefs.cache_key(kind), "Generating plan");
        }

        if self.dry_run {
            println!("[Dry run] {} plan, model {}", kind, config.api.model);
            println!();
            println!("System:");
            println!("{}", prompts::system_prompt(kind));
            println!();
            println!("Prompt:");
            println!("{}", prompts::plan_prompt(kind, &prefs));
            return Ok(());
        }

        let client = ChatClient::from_config(&config.api)?;
        let service = PlanService::from_config(client, config);
        let response = service.generate(kind, &prefs).await?;

        if self.raw {
            let plan = response.plan.as_deref().unwrap_or_default();
            return write_output(self.output.as_ref(), plan);
        }

        let renderer = PlanRenderer::new(RenderOptions::from_config(&config.render))?;
        let mut session = PlanSession::new(renderer);
        let rendered = session.receive(kind, &response)?;

        write_output(self.output.as_ref(), &rendered.html)
    }
}

use clap::Parser;
use secret_santa::utils::{logger, validation::Validate};
use secret_santa::{
    CliConfig, ConsoleMailer, DrawEngine, DrawOutcome, DrawPlan, MailerSettings, ProviderMailer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting secret-santa CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入並驗證抽籤計劃
    let plan = match DrawPlan::from_file(&config.input) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::error!("❌ Could not load draw plan from {}: {}", config.input, e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = plan.validate() {
        tracing::error!("❌ Draw plan validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    tracing::info!(
        participants = plan.participants.len(),
        organizer = plan.organizer_email.is_some(),
        "Draw plan loaded"
    );

    // 選擇寄信服務（啟動時決定一次）
    let mailer = if config.dry_run {
        tracing::info!("🔍 Dry run enabled, messages will only be logged");
        ProviderMailer::Console(ConsoleMailer::new())
    } else {
        match MailerSettings::from_env().and_then(|settings| settings.build_mailer()) {
            Ok(mailer) => mailer,
            Err(e) => {
                tracing::error!("❌ Mailer configuration failed: {}", e);
                eprintln!("❌ {}", e);
                eprintln!("💡 Set RESEND_API_KEY or SMTP_HOST/SMTP_USER/SMTP_PASS, or pass --dry-run");
                std::process::exit(1);
            }
        }
    };
    tracing::info!(provider = mailer.name(), "Mailer ready");

    // 執行抽籤並寄出通知
    let engine = DrawEngine::new(mailer);
    match engine
        .run(&plan.participants, plan.email_template.as_deref())
        .await
    {
        Ok(outcome) => {
            tracing::info!("✅ Draw completed successfully!");
            if !outcome.report.all_sent() {
                eprintln!(
                    "⚠️  {} notification(s) could not be delivered: {}",
                    outcome.report.failed,
                    outcome.report.failed_recipients().join(", ")
                );
            }
            println!("{}", render_result(&plan, &outcome)?);
        }
        Err(e) => {
            tracing::error!("❌ Draw failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Shapes the printed result. When the organizer is drawing too, everyone
/// else's pairing is withheld so the organizer cannot peek.
fn render_result(plan: &DrawPlan, outcome: &DrawOutcome) -> anyhow::Result<String> {
    let results: Vec<serde_json::Value> = match &plan.organizer_email {
        Some(organizer) => outcome
            .assignment
            .receiver_of(organizer)
            .map(|own| {
                vec![serde_json::json!({
                    "email": &own.giver,
                    "secretFriend": &own.receiver_nickname,
                })]
            })
            .unwrap_or_default(),
        None => outcome
            .assignment
            .pairs
            .iter()
            .map(|pair| {
                serde_json::json!({
                    "email": &pair.giver,
                    "secretFriend": &pair.receiver_nickname,
                })
            })
            .collect(),
    };

    let message = if plan.organizer_email.is_some() {
        "Draw completed. Results are withheld because the organizer is drawing too."
    } else {
        "Draw completed and notifications dispatched."
    };

    let document = serde_json::json!({
        "success": true,
        "message": message,
        "results": results,
        "totalParticipants": outcome.assignment.len(),
        "report": &outcome.report,
        "completedAt": outcome.completed_at,
    });

    Ok(serde_json::to_string_pretty(&document)?)
}

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use edgar_quarterly::{
    AnalysisOptions, AnalysisReport, ChatNarrator, DEFAULT_LLM_API_URL, DEFAULT_LLM_MODEL,
    DEFAULT_PRICE_API_URL, DisabledNarrator, Edgar, EdgarConfig, EdgarError, HttpPriceSource,
    Narrator, PeriodMetrics, analyze_stock,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "edgar-quarterly", version)]
#[command(about = "Quarterly fundamentals and trends from SEC EDGAR 10-Q filings")]
struct Args {
    /// Stock ticker symbol (e.g. AAPL)
    ticker: String,

    /// Number of most recent quarters to analyze
    #[arg(long, short = 'q', default_value_t = 3)]
    quarters: usize,

    /// Skip the current price lookup
    #[arg(long)]
    no_price: bool,

    /// Skip the generated investment summary
    #[arg(long)]
    no_summary: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// SEC.gov-required user agent (e.g. "MyApp you@example.com")
    #[arg(long, env = "SEC_USER_AGENT")]
    user_agent: Option<String>,

    /// Base URL of the price service
    #[arg(long, env = "PRICE_API_URL", default_value = DEFAULT_PRICE_API_URL)]
    price_url: String,

    /// Base URL of an OpenAI-compatible chat completions API
    #[arg(long, env = "LLM_API_URL", default_value = DEFAULT_LLM_API_URL)]
    llm_url: String,

    /// API key for the chat completions API
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    llm_key: Option<String>,

    /// Model name for the chat completions API
    #[arg(long, env = "LLM_MODEL", default_value = DEFAULT_LLM_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            match err.downcast_ref::<EdgarError>() {
                Some(e) if e.is_not_found() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = EdgarConfig::from_env();
    if let Some(user_agent) = args.user_agent {
        config.user_agent = user_agent;
    }
    let edgar = Edgar::with_config(config).context("failed to create Edgar client")?;
    let prices =
        HttpPriceSource::new(args.price_url.as_str()).context("failed to create price client")?;

    let narrator: Box<dyn Narrator + Send + Sync> = if args.no_summary {
        Box::new(DisabledNarrator)
    } else {
        Box::new(
            ChatNarrator::new(&args.llm_url, args.llm_key.as_deref(), args.model.as_str())
                .context("failed to create narrative client")?,
        )
    };

    let options = AnalysisOptions::new()
        .with_num_quarters(args.quarters)
        .with_current_price(!args.no_price);

    let report = analyze_stock(&edgar, &prices, narrator.as_ref(), &args.ticker, &options).await?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    } else {
        print_report(&report, !args.no_summary);
    }

    Ok(())
}

fn print_report(report: &AnalysisReport, with_summary: bool) {
    println!(
        "{} {} ({})",
        style(&report.ticker).cyan().bold(),
        style(&report.company_name).bold(),
        style(format!("CIK {}", report.cik)).dim()
    );
    println!(
        "{} {}   {} {}",
        style("Price:").bold(),
        style(money(report.current_price)).yellow(),
        style("As of:").bold(),
        report.analysis_date
    );
    println!();

    let header = format!(
        "{:<12} {:>6} {:>12} {:>12} {:>8} {:>8} {:>8}",
        "Period", "FP", "Revenue", "Net Income", "EPS", "Gross", "Op"
    );
    println!("{}", style(header).underlined());
    for quarter in &report.quarterly_metrics {
        print_quarter(quarter);
    }
    println!();

    let trends = &report.trend_analysis;
    println!("{}", style("Trends").bold().underlined());
    println!("  Revenue: {}", style(trends.revenue_trend).magenta());
    println!(
        "  Avg growth: {}",
        trends
            .avg_revenue_growth
            .map(|g| format!("{:.1}%", g * 100.0))
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!("  Margins: {}", style(trends.margin_trend).magenta());
    println!("  EPS:     {}", style(trends.eps_trend).magenta());

    if with_summary {
        println!();
        println!("{}", style("Summary").bold().underlined());
        println!("{}", report.investment_summary);
    }
}

fn print_quarter(quarter: &PeriodMetrics) {
    println!(
        "{:<12} {:>6} {:>12} {:>12} {:>8} {:>8} {:>8}",
        quarter.period_end,
        quarter.fiscal_period.as_deref().unwrap_or("-"),
        billions(quarter.revenue),
        billions(quarter.net_income),
        quarter
            .eps_diluted
            .map(|eps| format!("{:.2}", eps))
            .unwrap_or_else(|| "-".to_string()),
        percent(quarter.gross_margin),
        percent(quarter.operating_margin)
    );
}

fn money(value: Option<f64>) -> String {
    value
        .map(|v| format!("${:.2}", v))
        .unwrap_or_else(|| "N/A".to_string())
}

fn billions(value: Option<f64>) -> String {
    value
        .map(|v| format!("${:.2}B", v / 1e9))
        .unwrap_or_else(|| "-".to_string())
}

fn percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v * 100.0))
        .unwrap_or_else(|| "-".to_string())
}

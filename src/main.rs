use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use rfrender::{
    Accessibility, Client, ClientConfig, Dither, Flow, Orientation, OutputFormat, PdfMode,
    PdfStandard, RequestBuilder, Watermark, WatermarkLayer, DEFAULT_TIMEOUT_MS,
};
use std::path::PathBuf;

/// Command-line client for the RFox render server
#[derive(Parser, Debug)]
#[command(name = "rfrender", version, about)]
struct Cli {
    /// Render server base URL
    #[arg(long, env = "RFRENDER_URL", default_value = "http://localhost:3000")]
    server: String,

    /// Client-side request timeout in milliseconds
    #[arg(long, env = "RFRENDER_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    request_timeout_ms: u64,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe the server; exits non-zero when unhealthy
    Health,
    /// Render HTML or a URL to a file
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Read HTML from this file
    #[arg(long, conflicts_with_all = ["html", "url"])]
    html_file: Option<PathBuf>,
    /// Inline HTML
    #[arg(long, conflicts_with = "url")]
    html: Option<String>,
    /// Page for the server to fetch
    #[arg(long)]
    url: Option<String>,

    /// Output file (defaults to `out.<ext>`)
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Print the request payload instead of sending it
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long, default_value_t = OutputFormat::Pdf)]
    format: OutputFormat,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    paper: Option<String>,
    #[arg(long)]
    orientation: Option<Orientation>,
    /// Preset name or "top,right,bottom,left" in millimeters
    #[arg(long)]
    margins: Option<String>,
    #[arg(long)]
    flow: Option<Flow>,
    #[arg(long)]
    density: Option<u32>,
    #[arg(long)]
    background: Option<String>,
    /// Server-side page-load budget in seconds
    #[arg(long)]
    page_timeout: Option<u32>,

    #[arg(long)]
    colors: Option<u16>,
    /// Palette name, forwarded as given (e.g. "mono", "web-safe")
    #[arg(long, conflicts_with = "palette_colors")]
    palette: Option<String>,
    /// Comma-separated hex colors
    #[arg(long, value_delimiter = ',')]
    palette_colors: Option<Vec<String>>,
    #[arg(long)]
    dither: Option<Dither>,

    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    subject: Option<String>,
    #[arg(long)]
    keywords: Option<String>,
    #[arg(long)]
    bookmarks: bool,
    #[arg(long)]
    page_numbers: bool,
    #[arg(long)]
    standard: Option<PdfStandard>,
    #[arg(long)]
    pdf_mode: Option<PdfMode>,
    #[arg(long)]
    accessibility: Option<Accessibility>,
    #[arg(long)]
    linearize: bool,
    #[arg(long)]
    lang: Option<String>,

    #[arg(long)]
    watermark_text: Option<String>,
    #[arg(long)]
    watermark_opacity: Option<f64>,
    #[arg(long)]
    watermark_layer: Option<WatermarkLayer>,
    /// Page selector such as "1,3-5"
    #[arg(long)]
    watermark_pages: Option<String>,

    #[arg(long)]
    user_password: Option<String>,
    #[arg(long)]
    owner_password: Option<String>,
}

impl RenderArgs {
    fn builder<'c>(&self, client: &'c Client) -> anyhow::Result<RequestBuilder<'c>> {
        let mut b = if let Some(path) = &self.html_file {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            client.render_html(html)
        } else if let Some(html) = &self.html {
            client.render_html(html.clone())
        } else if let Some(url) = &self.url {
            client.render_url(url.clone())
        } else {
            bail!("one of --html-file, --html or --url is required");
        };

        b = b.format(self.format);
        if let Some(v) = self.width {
            b = b.width(v);
        }
        if let Some(v) = self.height {
            b = b.height(v);
        }
        if let Some(v) = &self.paper {
            b = b.paper(v.clone());
        }
        if let Some(v) = self.orientation {
            b = b.orientation(v);
        }
        if let Some(v) = &self.margins {
            b = b.margins(v.clone());
        }
        if let Some(v) = self.flow {
            b = b.flow(v);
        }
        if let Some(v) = self.density {
            b = b.density(v);
        }
        if let Some(v) = &self.background {
            b = b.background(v.clone());
        }
        if let Some(v) = self.page_timeout {
            b = b.timeout(v);
        }

        if let Some(v) = self.colors {
            b = b.colors(v);
        }
        if let Some(v) = &self.palette {
            b = b.palette(v.as_str());
        }
        if let Some(v) = &self.palette_colors {
            b = b.palette_colors(v.iter().cloned());
        }
        if let Some(v) = self.dither {
            b = b.dither(v);
        }

        if let Some(v) = &self.title {
            b = b.pdf_title(v.clone());
        }
        if let Some(v) = &self.author {
            b = b.pdf_author(v.clone());
        }
        if let Some(v) = &self.subject {
            b = b.pdf_subject(v.clone());
        }
        if let Some(v) = &self.keywords {
            b = b.pdf_keywords(v.clone());
        }
        if self.bookmarks {
            b = b.pdf_bookmarks(true);
        }
        if self.page_numbers {
            b = b.pdf_page_numbers(true);
        }
        if let Some(v) = self.standard {
            b = b.pdf_standard(v);
        }
        if let Some(v) = self.pdf_mode {
            b = b.pdf_mode(v);
        }
        if let Some(v) = self.accessibility {
            b = b.pdf_accessibility(v);
        }
        if self.linearize {
            b = b.pdf_linearize(true);
        }
        if let Some(v) = &self.lang {
            b = b.pdf_lang(v.clone());
        }

        let mut mark = Watermark::default();
        if let Some(v) = &self.watermark_text {
            mark = mark.with_text(v.clone());
        }
        if let Some(v) = self.watermark_opacity {
            mark = mark.opacity(v);
        }
        if let Some(v) = self.watermark_layer {
            mark = mark.layer(v);
        }
        if let Some(v) = &self.watermark_pages {
            mark = mark.pages(v.clone());
        }
        b = b.pdf_watermark(mark);

        let mut enc = rfrender::Encryption::new();
        if let Some(v) = &self.user_password {
            enc = enc.user_password(v.clone());
        }
        if let Some(v) = &self.owner_password {
            enc = enc.owner_password(v.clone());
        }
        b = b.pdf_encrypt(enc);

        Ok(b)
    }

    fn out_path(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("out.{}", self.format.extension())))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let client = Client::new(
        &cli.server,
        ClientConfig {
            timeout_ms: cli.request_timeout_ms,
        },
    )?;

    match &cli.command {
        Command::Health => {
            if client.health().await {
                println!("{}: healthy", client.base_url());
            } else {
                eprintln!("{}: unhealthy", client.base_url());
                std::process::exit(1);
            }
        }
        Command::Render(args) => {
            let builder = args.builder(&client)?;
            if args.dry_run {
                println!("{}", builder.to_json()?);
                return Ok(());
            }
            let out = args.out_path();
            let written = builder
                .save(&out)
                .await
                .with_context(|| format!("render to {} failed", out.display()))?;
            println!("wrote {} bytes to {}", written, out.display());
        }
    }

    Ok(())
}

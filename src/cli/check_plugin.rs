use clap::Args;
use plugcheck::config::Config;
use plugcheck::di::ServiceContainer;
use plugcheck::plugin::{self, CheckOptions};
use plugcheck::PlugcheckResult;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct CheckPluginArgs {
    /// Path to the go.sum file to analyze
    #[arg(short, long)]
    pub sum: Option<PathBuf>,
    /// The version of the go compiler used for your plugin
    #[arg(short, long)]
    pub go: Option<String>,
    /// Version of the libc library used
    #[arg(short, long)]
    pub libc: Option<String>,
    /// Shows fix commands to update your dependencies
    #[arg(short, long)]
    pub format: bool,
    /// Updates go.mod to fix the incompatibilities
    #[arg(long, conflicts_with = "json")]
    pub fix: bool,
    /// `go version -m` dump describing the host binary
    #[arg(long)]
    pub build_info: Option<PathBuf>,
    /// Print the incompatibilities as JSON
    #[arg(long)]
    pub json: bool,
}

/// Layer the command line flags over the configured defaults.
pub fn options(args: &CheckPluginArgs, container: &ServiceContainer) -> CheckOptions {
    let mut opts = CheckOptions::from_config(container.config());
    if let Some(ref sum) = args.sum {
        opts.sum_file = sum.clone();
    }
    if let Some(ref go) = args.go {
        opts.go_version = go.clone();
    }
    if let Some(ref libc) = args.libc {
        opts.libc_version = libc.clone();
    }
    opts.suggest |= args.format;
    opts.fix |= args.fix;
    opts.json = args.json;
    if opts.json {
        opts.fix = false;
    }
    opts
}

pub fn run(args: CheckPluginArgs) -> PlugcheckResult<()> {
    let mut config = Config::load()?;
    if let Some(ref path) = args.build_info {
        config.build_info = Some(path.to_string_lossy().into_owned());
    }
    let container = ServiceContainer::from_config(config)?;
    let opts = options(&args, &container);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    plugin::check(&mut out, &opts, container.describer())
}

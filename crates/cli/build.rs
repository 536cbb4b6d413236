use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("tersa")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Tersa Contributors")
        .about("Summarize articles and translate the summary to Urdu")
        .arg(clap::arg!([INPUT] "URL to fetch, local text or HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json, markdown)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json", "markdown"]),
        )
        .arg(
            clap::arg!(--"input-type" <TYPE> "Treat input as HTML or plain text")
                .value_name("TYPE")
                .default_value("auto")
                .value_parser(["auto", "html", "text"]),
        )
        .arg(clap::arg!(--"no-translate" "Skip translation of the summary"))
        .arg(
            clap::arg!(--lexicon <FILE> "JSON lexicon to translate with instead of the built-in one")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"max-sentences" <NUM> "Maximum number of summary sentences").default_value("5"))
        .arg(clap::arg!(--ratio <RATIO> "Fraction of sentences kept in the summary").default_value("0.3"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("10"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(-v --verbose "Show progress and the sentence score table"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_name("SHELL")
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        );

    for shell in [
        clap_complete::shells::Shell::Bash,
        clap_complete::shells::Shell::Zsh,
        clap_complete::shells::Shell::Fish,
        clap_complete::shells::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "tersa", &completions_dir).unwrap();
    }

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}

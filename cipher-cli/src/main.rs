#![deny(missing_docs)]
//! A command-line front end for the cipher workbench.
//!
//! Every cipher subcommand validates its arguments locally, sends one request to
//! the computation service and prints the step report it gets back.

use std::path::PathBuf;

use cipher_core::client::{DEFAULT_SERVICE_URL, HttpTransport};
use cipher_core::coordinator::{Coordinator, Outcome};
use cipher_core::input::{
    AdfgvxInput, GcdInput, HillInput, InverseInput, KeyedInput, ModExpInput, MonoalphabeticInput,
    PlayfairInput, PowerInput, RailFenceInput, RawInput, RsaInput, SdesInput, VigenereInput,
};
use cipher_core::key_order::KeywordTracker;
use cipher_core::preferences::{AppState, JsonFileStore};
use cipher_core::render::{Presentation, render};
use cipher_core::report::StepReport;
use cipher_core::request::{Mode, MonoVariant, VigenereVariant};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{error, info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Show the column order of a keyword\ncipher-cli key-order DATA\n\n# Encrypt with a keyed columnar transposition\ncipher-cli keyed \"attack at dawn\" --keyword DATA\n\n# Decrypt a rail fence, collapsing the first section of the report\ncipher-cli --collapse 1 rail-fence WECRLTEERDSOEEFEAOCAIVDEN --rails 3 --decrypt\n\n# Run RSA against a service on another host\ncipher-cli --service-url http://10.0.0.5:8000 rsa -p 61 -q 53 -e 17 -m 65\n\n# Switch between the light and dark theme\ncipher-cli theme toggle"
)]
struct Cli {
    /// Base URL of the computation service.
    #[arg(long, global = true, env = "CIPHER_SERVICE_URL", default_value = DEFAULT_SERVICE_URL)]
    service_url: String,

    /// The preference file.
    #[arg(long, global = true, default_value = ".cipher_prefs.json")]
    prefs: PathBuf,

    /// Report sections to show collapsed, e.g. `--collapse 1,3`.
    #[arg(long, global = true, value_delimiter = ',', value_name = "N")]
    collapse: Vec<usize>,

    /// Print the report fingerprint after the report.
    #[arg(long, global = true)]
    digest: bool,

    /// Print the report as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Direction {
    /// Decrypt instead of encrypt
    #[arg(short, long)]
    decrypt: bool,
}

impl Direction {
    const fn mode(&self) -> Mode {
        if self.decrypt {
            Mode::Decrypt
        } else {
            Mode::Encrypt
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Family {
    Additive,
    Multiplicative,
    Affine,
}

impl From<Family> for MonoVariant {
    fn from(family: Family) -> Self {
        match family {
            Family::Additive => Self::Additive,
            Family::Multiplicative => Self::Multiplicative,
            Family::Affine => Self::Affine,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Keyed columnar transposition
    Keyed {
        /// The text to transform
        text: String,
        /// The keyword
        #[arg(short, long)]
        keyword: String,
        /// Column order overriding the one derived from the keyword, e.g. `3,1,4,2`
        #[arg(long, value_delimiter = ',')]
        order: Option<Vec<String>>,
        #[command(flatten)]
        direction: Direction,
    },
    /// Additive, multiplicative or affine substitution
    Mono {
        /// The text to transform
        text: String,
        /// Substitution family
        #[arg(long, value_enum, default_value_t = Family::Additive)]
        variant: Family,
        /// Key for the additive and multiplicative families
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        k: String,
        /// Affine multiplier
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        a: String,
        /// Affine shift
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        b: String,
        #[command(flatten)]
        direction: Direction,
    },
    /// Playfair digraph substitution
    Playfair {
        /// Text to encrypt
        text: String,
        /// Square keyword
        #[arg(short, long)]
        keyword: String,
    },
    /// Rail fence transposition
    RailFence {
        /// The text to transform
        text: String,
        /// Number of rails
        #[arg(short, long, allow_hyphen_values = true)]
        rails: String,
        #[command(flatten)]
        direction: Direction,
    },
    /// Vigenère or autokey substitution
    Vigenere {
        /// The text to transform
        text: String,
        /// The key
        #[arg(short, long)]
        key: String,
        /// Use the autokey schedule
        #[arg(long)]
        autokey: bool,
        #[command(flatten)]
        direction: Direction,
    },
    /// Hill matrix cipher
    Hill {
        /// Text to encrypt
        text: String,
        /// Key matrix order
        #[arg(long, default_value_t = cipher_core::input::DEFAULT_HILL_SIZE)]
        size: usize,
        /// Key matrix rows separated by `;`, e.g. `6,24,1;13,16,10;20,17,15`
        #[arg(long)]
        matrix: Option<String>,
    },
    /// ADFGVX fractionation cipher
    Adfgvx {
        /// The text to transform
        text: String,
        /// Polybius square keyword
        #[arg(long)]
        poly_key: String,
        /// Transposition keyword
        #[arg(long)]
        trans_key: String,
        #[command(flatten)]
        direction: Direction,
    },
    /// Textbook RSA
    Rsa {
        /// First prime
        #[arg(short, allow_hyphen_values = true)]
        p: String,
        /// Second prime
        #[arg(short, allow_hyphen_values = true)]
        q: String,
        /// Public exponent
        #[arg(short, allow_hyphen_values = true)]
        e: String,
        /// Message
        #[arg(short, allow_hyphen_values = true)]
        m: String,
    },
    /// Simplified DES. Unset tables take their textbook values.
    Sdes {
        /// 8-bit block
        #[arg(long)]
        plaintext: Option<String>,
        /// 10-bit key
        #[arg(long)]
        key: Option<String>,
        /// P10 table, comma separated
        #[arg(long)]
        p10: Option<String>,
        /// P8 table, comma separated
        #[arg(long)]
        p8: Option<String>,
        /// Initial permutation, comma separated
        #[arg(long)]
        ip: Option<String>,
        /// Expansion permutation, comma separated
        #[arg(long)]
        ep: Option<String>,
        /// P4 table, comma separated
        #[arg(long)]
        p4: Option<String>,
        /// S0 box rows separated by `;`
        #[arg(long)]
        s0: Option<String>,
        /// S1 box rows separated by `;`
        #[arg(long)]
        s1: Option<String>,
    },
    /// base^exponent mod modulus by Euler's theorem
    Euler {
        /// Base
        #[arg(allow_hyphen_values = true)]
        base: String,
        /// Exponent
        #[arg(allow_hyphen_values = true)]
        exponent: String,
        /// Modulus
        #[arg(allow_hyphen_values = true)]
        modulus: String,
    },
    /// Modular inverse by the extended Euclidean algorithm
    ExtEuclid {
        /// Value to invert
        #[arg(allow_hyphen_values = true)]
        a: String,
        /// Modulus
        #[arg(allow_hyphen_values = true)]
        m: String,
    },
    /// Greatest common divisor
    Gcd {
        /// First operand
        #[arg(allow_hyphen_values = true)]
        a: String,
        /// Second operand
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
    /// a^n mod m by square-and-multiply
    ModExp {
        /// Base
        #[arg(allow_hyphen_values = true)]
        a: String,
        /// Exponent
        #[arg(allow_hyphen_values = true)]
        n: String,
        /// Modulus
        #[arg(allow_hyphen_values = true)]
        m: String,
    },
    /// base^exponent mod modulus by Fermat's little theorem
    Fermat {
        /// Base
        #[arg(allow_hyphen_values = true)]
        base: String,
        /// Exponent
        #[arg(allow_hyphen_values = true)]
        exponent: String,
        /// Modulus
        #[arg(allow_hyphen_values = true)]
        modulus: String,
    },
    /// Print the column order derived from a keyword
    KeyOrder {
        /// The keyword
        keyword: String,
    },
    /// Show or switch the colour theme
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

fn list(raw: &str) -> Vec<String> {
    raw.split(',').map(|entry| entry.trim().to_owned()).collect()
}

fn grid(raw: &str) -> Vec<Vec<String>> {
    raw.split(';').map(list).collect()
}

/// Turns a cipher subcommand into page input. Returns `None` for the local commands.
fn raw_input(command: &Commands, state: &mut AppState) -> Option<RawInput> {
    let input = match command {
        Commands::Keyed {
            text,
            keyword,
            order,
            direction,
        } => {
            state.keyword.set_keyword(keyword);
            let column_order = order.clone().unwrap_or_else(|| {
                state
                    .keyword
                    .order()
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            });
            RawInput::KeyedColumnar(KeyedInput {
                mode: direction.mode(),
                text: text.clone(),
                keyword: keyword.clone(),
                column_order,
            })
        }
        Commands::Mono {
            text,
            variant,
            k,
            a,
            b,
            direction,
        } => RawInput::Monoalphabetic(MonoalphabeticInput {
            variant: (*variant).into(),
            mode: direction.mode(),
            text: text.clone(),
            key_k: k.clone(),
            key_a: a.clone(),
            key_b: b.clone(),
        }),
        Commands::Playfair { text, keyword } => RawInput::Playfair(PlayfairInput {
            plaintext: text.clone(),
            keyword: keyword.clone(),
        }),
        Commands::RailFence {
            text,
            rails,
            direction,
        } => RawInput::RailFence(RailFenceInput {
            mode: direction.mode(),
            text: text.clone(),
            rails: rails.clone(),
        }),
        Commands::Vigenere {
            text,
            key,
            autokey,
            direction,
        } => RawInput::Vigenere(VigenereInput {
            variant: if *autokey {
                VigenereVariant::Autokey
            } else {
                VigenereVariant::Vigenere
            },
            mode: direction.mode(),
            text: text.clone(),
            key: key.clone(),
        }),
        Commands::Hill { text, size, matrix } => {
            // An unsupported order keeps the session's matrix size and leaves the
            // matrix empty for validation to reject.
            let mut input = if state.set_hill_matrix_size(*size) {
                state.hill_input()
            } else {
                warn!(
                    "Matrix size {size} is not offered; keeping {}.",
                    state.hill_matrix_size
                );
                HillInput {
                    plaintext: String::new(),
                    size: *size,
                    matrix: Vec::new(),
                }
            };
            input.plaintext = text.clone();
            if let Some(matrix) = matrix {
                input.matrix = grid(matrix);
            }
            RawInput::Hill(input)
        }
        Commands::Adfgvx {
            text,
            poly_key,
            trans_key,
            direction,
        } => RawInput::Adfgvx(AdfgvxInput {
            mode: direction.mode(),
            text: text.clone(),
            poly_key: poly_key.clone(),
            trans_key: trans_key.clone(),
        }),
        Commands::Rsa { p, q, e, m } => RawInput::Rsa(RsaInput {
            p: p.clone(),
            q: q.clone(),
            e: e.clone(),
            m: m.clone(),
        }),
        Commands::Sdes {
            plaintext,
            key,
            p10,
            p8,
            ip,
            ep,
            p4,
            s0,
            s1,
        } => {
            let defaults = SdesInput::default();
            RawInput::Sdes(SdesInput {
                plaintext: plaintext.clone().unwrap_or(defaults.plaintext),
                key: key.clone().unwrap_or(defaults.key),
                p10: p10.as_deref().map_or(defaults.p10, list),
                p8: p8.as_deref().map_or(defaults.p8, list),
                ip: ip.as_deref().map_or(defaults.ip, list),
                ep: ep.as_deref().map_or(defaults.ep, list),
                p4: p4.as_deref().map_or(defaults.p4, list),
                s0: s0.as_deref().map_or(defaults.s0, grid),
                s1: s1.as_deref().map_or(defaults.s1, grid),
            })
        }
        Commands::Euler {
            base,
            exponent,
            modulus,
        } => RawInput::Euler(PowerInput {
            base: base.clone(),
            exponent: exponent.clone(),
            modulus: modulus.clone(),
        }),
        Commands::ExtEuclid { a, m } => RawInput::ExtendedEuclidean(InverseInput {
            a: a.clone(),
            m: m.clone(),
        }),
        Commands::Gcd { a, b } => RawInput::Gcd(GcdInput {
            a: a.clone(),
            b: b.clone(),
        }),
        Commands::ModExp { a, n, m } => RawInput::ModExp(ModExpInput {
            a: a.clone(),
            n: n.clone(),
            m: m.clone(),
        }),
        Commands::Fermat {
            base,
            exponent,
            modulus,
        } => RawInput::Fermat(PowerInput {
            base: base.clone(),
            exponent: exponent.clone(),
            modulus: modulus.clone(),
        }),
        Commands::KeyOrder { .. } | Commands::Theme { .. } => return None,
    };
    Some(input)
}

fn print_report(cli: &Cli, report: &StepReport) {
    let mut view = render(report);
    for &number in &cli.collapse {
        if view.toggle(number).is_none() {
            warn!("The report has no section {number} to collapse.");
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&Presentation::Report(view)) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize the report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{view}");
    }

    if cli.digest {
        println!("Digest: {}", report.digest());
    }
}

fn run_theme(cli: &Cli, command: &ThemeCommands) {
    let mut store = JsonFileStore::open(&cli.prefs).unwrap_or_else(|e| {
        error!("Failed to load preferences from '{}': {e}", cli.prefs.display());
        std::process::exit(1);
    });
    let mut state = AppState::load(&store);
    match command {
        ThemeCommands::Show => println!("{}", state.theme.as_str()),
        ThemeCommands::Toggle => match state.toggle_theme(&mut store) {
            Ok(theme) => println!("Theme set to {}", theme.as_str()),
            Err(e) => {
                error!("Failed to save preferences: {e}");
                std::process::exit(1);
            }
        },
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::KeyOrder { keyword } => {
            let tracker = KeywordTracker::new(keyword);
            if tracker.keyword().is_empty() {
                error!("Keyword cannot be empty");
                std::process::exit(1);
            }
            let order: Vec<String> = tracker.order().iter().map(ToString::to_string).collect();
            println!("{}", order.join(" "));
            return;
        }
        Commands::Theme { command } => {
            run_theme(&cli, command);
            return;
        }
        _ => {}
    }

    let mut state = AppState::default();
    let Some(input) = raw_input(&cli.command, &mut state) else {
        return;
    };

    info!("Submitting {} to {}", input.kind(), cli.service_url);
    let coordinator = Coordinator::new(HttpTransport::new(&cli.service_url));
    match coordinator.submit(&input).await {
        Outcome::Rendered(report) => print_report(&cli, &report),
        Outcome::Rejected(errors) => {
            for message in errors.messages() {
                error!("{message}");
            }
            std::process::exit(1);
        }
        Outcome::Failed(diagnostic) => {
            error!("{diagnostic}");
            std::process::exit(1);
        }
        Outcome::Busy => {
            error!("A {} submission is already in flight.", input.kind());
            std::process::exit(1);
        }
    }
}

//! The cachetrace executable supports the following command line arguments:
//!
//! `cachetrace [--engine ENGINE] [--url URL] [-v...] store <VALUE>... [--text | --bytes-hex] [--replay] [--json]`
//!
//!     Flush the namespace, store each VALUE under a new key and print the keys, one per line.
//!     Values that parse as integers are stored as integers, other numbers as floats and
//!     everything else as text. --text stores every value as text, --bytes-hex decodes
//!     each value from hex and stores the bytes.
//!     --replay prints the call history of `store` afterwards.
//!
//! `cachetrace [--engine ENGINE] [--url URL] replay <OPERATION> [--json]`
//!
//!     Print the call history of OPERATION. Nothing is flushed.
//!
//! `cachetrace [--engine ENGINE] [--url URL] get <KEY> [--as raw|text|int]`
//!
//!     Print the value stored under KEY, or "Key not found". Nothing is flushed.
//!
//! --engine is either `redis` (the default) or `memory`, an in-process store that lives only as
//! long as the command. --url defaults to redis://127.0.0.1:6379/0 and can also be set with the
//! CACHETRACE_URL environment variable.
//! Errors are printed to STDERR and the exit code is non-zero.

use std::process::exit;

use cachetrace::{
    decode_int, decode_str, replay, Cache, CacheError, Data, MemoryEngine, RedisEngine, Replay,
    Result, StoreEngine, DEFAULT_REDIS_URL, STORE_OPERATION,
};
use clap::{arg_enum, crate_version, value_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use redis::IntoConnectionInfo;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

arg_enum! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Engine {
        redis,
        memory
    }
}

arg_enum! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum ReadAs {
        raw,
        text,
        int
    }
}

/// how `store` should turn command line values into [`Data`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ValueKind {
    Inferred,
    Text,
    BytesHex,
}

/// the sub command to run
#[derive(Debug)]
enum Command {
    Store {
        values: Vec<Data>,
        replay: bool,
        json: bool,
    },
    Replay {
        operation: String,
        json: bool,
    },
    Get {
        key: String,
        read_as: ReadAs,
    },
}

/// ['Opt'] holds parsed and validated options from the command line
#[derive(Debug)]
struct Opt {
    engine: Engine,
    url: String,
    command: Command,
}

impl Opt {
    /// validates the `url` parameter when the redis engine is in use
    /// returns `Ok<Opt>` if everything is valid
    /// # Errors
    /// returns [`CacheError::Parsing`] if the url is not a valid redis url
    ///
    fn build(engine: Engine, url: &str, command: Command) -> Result<Opt> {
        if engine == Engine::redis {
            url.into_connection_info()
                .map_err(|e| CacheError::Parsing(format!("invalid redis url: {}", e)))?;
        }
        Ok(Opt {
            engine,
            url: url.to_owned(),
            command,
        })
    }
}

fn main() {
    let matches = App::new("cachetrace")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("an instrumented cache that records how it is used")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(Arg::with_name("engine")
            .long("engine")
            .value_name("ENGINE_NAME")
            .help("sets the storage engine to use, either 'redis' or 'memory'")
            .possible_values(&Engine::variants())
            .default_value("redis"))
        .arg(Arg::with_name("url")
            .long("url")
            .value_name("URL")
            .help("sets the url of the redis server, including the database index")
            .env("CACHETRACE_URL")
            .default_value(DEFAULT_REDIS_URL))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .help("logs more to STDERR, repeat for even more"))
        .subcommands(vec![
            SubCommand::with_name("store")
                .about("Flush the namespace and store values under new keys")
                .arg(Arg::with_name("VALUE").required(true).multiple(true).index(1))
                .arg(Arg::with_name("text")
                    .long("text")
                    .conflicts_with("bytes-hex")
                    .help("stores every value as text"))
                .arg(Arg::with_name("bytes-hex")
                    .long("bytes-hex")
                    .help("decodes every value from hex and stores the bytes"))
                .arg(Arg::with_name("replay")
                    .long("replay")
                    .help("prints the call history of store afterwards"))
                .arg(Arg::with_name("json")
                    .long("json")
                    .requires("replay")
                    .help("prints the call history as JSON")),
            SubCommand::with_name("replay")
                .about("Print the call history of an operation")
                .arg(Arg::with_name("OPERATION").required(true).index(1))
                .arg(Arg::with_name("json")
                    .long("json")
                    .help("prints the call history as JSON")),
            SubCommand::with_name("get")
                .about("Print the value stored under a key")
                .arg(Arg::with_name("KEY").required(true).index(1))
                .arg(Arg::with_name("as")
                    .long("as")
                    .value_name("KIND")
                    .possible_values(&ReadAs::variants())
                    .default_value("raw")
                    .help("how to decode the stored bytes")),
        ])
        .get_matches();

    subscriber_config(matches.occurrences_of("verbose"));

    let opt = match parse_options(&matches) {
        Ok(opt) => opt,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };
    debug!(engine = %opt.engine, command = ?opt.command);

    if let Err(e) = run(opt) {
        eprintln!("{}", e);
        exit(1);
    }
}

/// parses the matches from the command line into an [`Opt`] struct
fn parse_options(matches: &ArgMatches) -> Result<Opt> {
    let engine = value_t!(matches, "engine", Engine)
        .map_err(|e| CacheError::Parsing(e.message))?;
    let url = matches.value_of("url").unwrap_or(DEFAULT_REDIS_URL);

    let command = match matches.subcommand() {
        ("store", Some(args)) => {
            let kind = if args.is_present("text") {
                ValueKind::Text
            } else if args.is_present("bytes-hex") {
                ValueKind::BytesHex
            } else {
                ValueKind::Inferred
            };
            let values = args
                .values_of("VALUE")
                .into_iter()
                .flatten()
                .map(|v| parse_value(v, kind))
                .collect::<Result<Vec<_>>>()?;
            Command::Store {
                values,
                replay: args.is_present("replay"),
                json: args.is_present("json"),
            }
        }
        ("replay", Some(args)) => Command::Replay {
            operation: args.value_of("OPERATION").map(String::from).unwrap_or_default(),
            json: args.is_present("json"),
        },
        ("get", Some(args)) => Command::Get {
            key: args.value_of("KEY").map(String::from).unwrap_or_default(),
            read_as: value_t!(args, "as", ReadAs).map_err(|e| CacheError::Parsing(e.message))?,
        },
        (other, _) => return Err(CacheError::Parsing(format!("unknown command: {}", other))),
    };

    Opt::build(engine, url, command)
}

/// converts one command line value into [`Data`]
fn parse_value(value: &str, kind: ValueKind) -> Result<Data> {
    match kind {
        ValueKind::Inferred => Ok(Data::infer(value)),
        ValueKind::Text => Ok(Data::Text(value.to_owned())),
        ValueKind::BytesHex => hex::decode(value)
            .map(Data::Bytes)
            .map_err(|e| CacheError::Parsing(format!("could not decode {} as hex: {}", value, e))),
    }
}

fn run(opt: Opt) -> Result<()> {
    match opt.engine {
        Engine::redis => run_with_engine(RedisEngine::open(&opt.url)?, opt.command),
        Engine::memory => run_with_engine(MemoryEngine::new(), opt.command),
    }
}

fn run_with_engine<E: StoreEngine>(mut engine: E, command: Command) -> Result<()> {
    match command {
        Command::Store { values, replay, json } => {
            let mut cache = Cache::new(engine)?;
            for value in values {
                println!("{}", cache.store(value)?);
            }
            if replay {
                print_replay(cache.engine_mut(), STORE_OPERATION, json)?;
            }
        }
        Command::Replay { operation, json } => {
            print_replay(&mut engine, &operation, json)?;
        }
        Command::Get { key, read_as } => match engine.get(&key)? {
            None => println!("Key not found"),
            Some(raw) => match read_as {
                ReadAs::raw => println!("{}", String::from_utf8_lossy(&raw)),
                ReadAs::text => println!("{}", decode_str(raw)),
                ReadAs::int => println!("{}", decode_int(&raw)),
            },
        },
    }
    Ok(())
}

/// prints the call history of `operation`, as text or as JSON
fn print_replay<E: StoreEngine>(engine: &mut E, operation: &str, json: bool) -> Result<()> {
    if json {
        let history = Replay::load(engine, operation)?;
        println!("{}", serde_json::to_string_pretty(&history)?);
        Ok(())
    } else {
        replay(engine, operation)
    }
}

/// configures a tracing subscriber that will log to STDERR, `verbosity` is the number of
/// times `-v` was given
fn subscriber_config(verbosity: u64) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        // log to stderr instead of stdout
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}

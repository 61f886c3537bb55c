use ctmount::{mount, setup_hooks, Harness, MountOptions, Template, TestBed, TestReport, VNode};
use std::io::Read;
use std::process::ExitCode;
use tracing::{info, span, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

struct Args {
    pub input: String,
    pub vnode: bool,
    pub wait: bool,
    pub log: bool,
    pub trace: bool,
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Could not parse arguments: {}", e);
            eprintln!("usage: ctmount <input|-> [--vnode] [--wait] [--log] [--trace]");
            return ExitCode::from(2);
        }
    };
    if args.trace {
        tracing_subscriber::fmt::fmt()
            .with_span_events(FmtSpan::ACTIVE)
            .with_max_level(Level::TRACE)
            .with_env_filter(EnvFilter::from_default_env())
            .finish()
            .init();
        info!("Logger initialized");
    }

    match mount_from_input(&args) {
        Ok(report) if report.passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();
    let args = Args {
        vnode: pargs.contains("--vnode"),
        wait: pargs.contains(["--wait", "-w"]),
        log: pargs.contains(["--log", "-l"]),
        trace: pargs.contains(["--trace", "-t"]),
        input: pargs.free_from_str()?,
    };
    Ok(args)
}

fn read_input(input: &str) -> std::io::Result<String> {
    let span = span!(Level::DEBUG, "Reading input", input);
    let _enter = span.enter();
    if input == "-" {
        let mut markup = String::new();
        std::io::stdin().read_to_string(&mut markup)?;
        Ok(markup)
    } else {
        std::fs::read_to_string(input)
    }
}

/// Mounts the input into a fresh test bed, prints the container markup, the
/// log records and the outcome
fn mount_from_input(args: &Args) -> Result<TestReport, Box<dyn std::error::Error>> {
    let markup = read_input(&args.input)?;
    let template = if args.vnode {
        Template::Nodes(VNode::from_markup(&markup))
    } else {
        Template::Markup(markup)
    };
    let options = MountOptions {
        wait_until_visible: args.wait,
        log: args.log,
    };

    let mut bed = TestBed::new(ctmount::Env::from_process())?;
    setup_hooks(&mut bed);
    let mut rendered = String::new();
    let report = bed.run(&args.input, |bed| {
        let handle = mount(bed, template, Some(options))?;
        rendered = bed.document().inner_html(handle.container);
        Ok(())
    });

    println!("{}", rendered);
    for record in &report.logs {
        println!("[{}] {}", record.name, record.message);
    }
    match &report.outcome {
        Ok(()) => println!("{}: passed", report.name),
        Err(e) => println!("{}: failed: {}", report.name, e),
    }
    Ok(report)
}

use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use sitepad::{
    api::{self, Edit},
    errors::IoError,
    preview::{self, Viewport},
    seed::DEFAULT_SELECTION,
    utils::language_for,
    BuildConfig, BuildReport, ProjectTree,
};
use std::path::{Path, PathBuf};

fn parse_replacement(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((id, path)) if !id.is_empty() && !path.is_empty() => {
            Ok((id.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected ID=FILE, got '{}'", value)),
    }
}

fn project_args() -> [Arg; 4] {
    [
        Arg::new("project")
            .long("project")
            .short('p')
            .help("Project directory to load instead of the built-in default project")
            .value_parser(clap::value_parser!(PathBuf)),
        Arg::new("config")
            .long("config")
            .short('c')
            .help("TOML build configuration")
            .value_parser(clap::value_parser!(PathBuf)),
        Arg::new("replace")
            .long("replace")
            .help("Replace the content of node ID with the text of FILE before building")
            .value_name("ID=FILE")
            .value_parser(parse_replacement)
            .action(ArgAction::Append),
        Arg::new("toggle")
            .long("toggle")
            .help("Expand or collapse the folder with this id")
            .value_name("ID")
            .action(ArgAction::Append),
    ]
}

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("tree")
                .about("Shows the project files as the file tree would")
                .args(project_args())
                .arg(
                    Arg::new("select")
                        .long("select")
                        .help("File to open in the editor")
                        .value_name("ID")
                        .default_value(DEFAULT_SELECTION),
                ),
        )
        .subcommand(
            Command::new("build")
                .about("Builds the project and prints the build log")
                .args(project_args()),
        )
        .subcommand(
            Command::new("preview")
                .about("Builds the project and prints one generated page")
                .args(project_args())
                .arg(
                    Arg::new("page")
                        .long("page")
                        .help("Output path of the page to show, defaults to the index page"),
                )
                .arg(
                    Arg::new("viewport")
                        .long("viewport")
                        .help("Preview frame size")
                        .value_parser(Viewport::NAMES)
                        .default_value("desktop"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Builds the project and writes the generated pages to a directory")
                .args(project_args())
                .arg(
                    Arg::new("destination")
                        .help("Directory the output folder is written into")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Write without asking for confirmation")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("tree", args)) => handle_tree(args),
        Some(("build", args)) => handle_build(args),
        Some(("preview", args)) => handle_preview(args),
        Some(("export", args)) => handle_export(args),
        _ => unreachable!(),
    }
}

fn init_logging(is_verbose: bool) {
    let default_level = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn open(args: &ArgMatches) -> miette::Result<(ProjectTree, BuildConfig)> {
    let project = args.get_one::<PathBuf>("project").map(PathBuf::as_path);
    let config = args.get_one::<PathBuf>("config").map(PathBuf::as_path);

    let (tree, config) = api::open_project(project, config)?;

    let mut edits = Vec::new();
    for (id, path) in args
        .get_many::<(String, PathBuf)>("replace")
        .into_iter()
        .flatten()
    {
        let content = read_text(path)?;
        edits.push(Edit {
            id: id.clone(),
            content,
        });
    }

    let toggles: Vec<String> = args
        .get_many::<String>("toggle")
        .into_iter()
        .flatten()
        .cloned()
        .collect();

    let tree = api::apply_edits(tree, &edits, &toggles)?;

    Ok((tree, config))
}

fn read_text(path: &Path) -> miette::Result<String> {
    Ok(std::fs::read_to_string(path).map_err(|error| IoError::read(path, error))?)
}

fn build(args: &ArgMatches) -> miette::Result<BuildReport> {
    let (tree, config) = open(args)?;

    Ok(api::build_project(&tree, &config))
}

fn exit_on_failure(report: &BuildReport) {
    if !report.success {
        preview::print_build_log(report);
        std::process::exit(1);
    }
}

fn handle_tree(args: &ArgMatches) -> miette::Result<()> {
    let (tree, _) = open(args)?;

    preview::print_project_tree(&tree);

    let selected = args
        .get_one::<String>("select")
        .expect("select has a default");
    match tree.find(selected) {
        Some(node) if node.is_file() => println!(
            "\nEditing {} ({})",
            node.path(),
            language_for(node.name())
        ),
        _ => println!("\nSelect a file from the tree to start editing"),
    }

    Ok(())
}

fn handle_build(args: &ArgMatches) -> miette::Result<()> {
    let report = build(args)?;

    exit_on_failure(&report);
    preview::print_build_log(&report);

    Ok(())
}

fn handle_preview(args: &ArgMatches) -> miette::Result<()> {
    let report = build(args)?;
    exit_on_failure(&report);

    let viewport: Viewport = args
        .get_one::<String>("viewport")
        .map(|name| name.parse())
        .transpose()
        .map_err(|message: String| miette::miette!("{}", message))?
        .unwrap_or_default();

    let document = match args.get_one::<String>("page") {
        Some(page) => report
            .document(page)
            .or_else(|| {
                report
                    .documents
                    .iter()
                    .find(|document| document.output_path.ends_with(&format!("/{}", page)))
            })
            .ok_or_else(|| {
                miette::miette!(
                    help = format!("Generated pages: {}", report.output_paths().join(", ")),
                    "no generated page at '{}'",
                    page
                )
            })?,
        None => match report.preview_document() {
            Some(document) => document,
            None => {
                println!("No pages were generated");
                return Ok(());
            }
        },
    };

    println!("{}", preview::render_page(document, viewport));

    Ok(())
}

fn handle_export(args: &ArgMatches) -> miette::Result<()> {
    let destination = args
        .get_one::<PathBuf>("destination")
        .expect("destination required");
    let assume_yes = args.get_flag("yes");

    let report = build(args)?;
    exit_on_failure(&report);

    if !api::export_project(&report, destination, assume_yes)?.is_committed() {
        println!("Export canceled, nothing was written");
    }

    Ok(())
}

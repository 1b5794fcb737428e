use clap::{arg, command};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    command!("linkmap")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linkmap")
        .about("Visualize the hierarchy of crawled links stored in a link database")
        .styles(CLAP_STYLING)
        .arg(
            arg!(--"db" <PATH>)
                .required(false)
                .help("Path to the SQLite link database")
                .default_value("data/links.db"),
        )
        .arg(
            arg!(--"max-depth" <DEPTH>)
                .required(false)
                .help("Maximum depth to visualize (default: all depths)")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            arg!(--"layout" <LAYOUT>)
                .required(false)
                .help("Layout type for visualization")
                .value_parser(["tree", "circular", "shell", "all"])
                .default_value("all"),
        )
        .arg(
            arg!(--"full-urls")
                .required(false)
                .help("Show full URLs instead of shortened labels")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"output-prefix" <PREFIX>)
                .required(false)
                .help("Output file prefix")
                .default_value("link_hierarchy"),
        )
        .arg(
            arg!(-i --"interactive")
                .required(false)
                .help("Write interactive HTML pages instead of static SVG images")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"color-by" <MODE>)
                .required(false)
                .help("Color nodes by depth or by keyword category")
                .value_parser(["depth", "category"])
                .default_value("depth"),
        )
        .arg(
            arg!(--"stats-format" <FORMAT>)
                .required(false)
                .help("Statistics format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            arg!(--"stats-file" <PATH>)
                .required(false)
                .help("Also save the statistics report to a file")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(-q --"quiet" "Only print errors")
                .required(false)
                .conflicts_with("verbose"),
        )
        .arg(arg!(-v --"verbose" "Print debug logging").required(false))
}

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Pure clap command definitions with zero business logic
#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("conn-a")
                .env("DB_CONN_A")
                .help("<driver>:host=<host>;port=<port>;dbname=<db>;user=<user>;password=<pass>")
                .long("conn-a")
                .short('a')
                .required(true),
        )
        .arg(
            Arg::new("conn-b")
                .env("DB_CONN_B")
                .help("connection string for the second database, same format as --conn-a")
                .long("conn-b")
                .short('b')
                .required(true),
        )
        .arg(
            Arg::new("query")
                .default_value("SELECT * FROM test LIMIT 1")
                .env("DBPROBE_QUERY")
                .help("probe query executed against both databases")
                .long("query")
                .short('q'),
        )
        .arg(
            Arg::new("format")
                .default_value("text")
                .env("DBPROBE_FORMAT")
                .help("output format")
                .long("format")
                .short('f')
                .value_parser(["text", "ansi", "html", "json"]),
        )
}

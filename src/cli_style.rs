use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use unicode_width::UnicodeWidthStr;

const PANEL_WIDTH: usize = 60;
const WELCOME_WIDTH: usize = 64;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

fn ansi(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(ansi(AnsiColor::Red).bold().underline())
        .header(ansi(AnsiColor::Red).bold().underline())
        .literal(ansi(AnsiColor::BrightWhite).bold())
        .invalid(ansi(AnsiColor::Yellow).bold())
        .error(ansi(AnsiColor::BrightRed).bold())
        .valid(ansi(AnsiColor::Green).bold())
        .placeholder(ansi(AnsiColor::BrightBlack))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::Rgb { r, g, b }
    }

    pub const RED: Color = rgb(230, 33, 23);
    pub const CORAL: Color = rgb(255, 112, 84);
    pub const AMBER: Color = rgb(255, 184, 28);
    pub const GREEN: Color = rgb(46, 204, 113);
    pub const CYAN: Color = rgb(72, 201, 238);
    pub const BLUE: Color = rgb(93, 139, 244);
    pub const DIM: Color = rgb(140, 140, 150);
    pub const WHITE: Color = rgb(245, 245, 245);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Glyphs
// ═══════════════════════════════════════════════════════════════════════════════

pub mod glyphs {
    /// Corner, fill and junction characters of one border line.
    pub struct Border {
        pub left: &'static str,
        pub fill: &'static str,
        pub junction: &'static str,
        pub right: &'static str,
    }

    pub const PANEL_TOP: Border = Border {
        left: "╭",
        fill: "─",
        junction: "┬",
        right: "╮",
    };
    pub const PANEL_MIDDLE: Border = Border {
        left: "├",
        fill: "─",
        junction: "┼",
        right: "┤",
    };
    pub const PANEL_BOTTOM: Border = Border {
        left: "╰",
        fill: "─",
        junction: "┴",
        right: "╯",
    };
    pub const FRAME_TOP: Border = Border {
        left: "╔",
        fill: "═",
        junction: "═",
        right: "╗",
    };
    pub const FRAME_BOTTOM: Border = Border {
        left: "╚",
        fill: "═",
        junction: "═",
        right: "╝",
    };

    pub const RULE: &str = "│";
    pub const FRAME_SIDE: &str = "║";

    pub const BRANCH: &str = "├── ";
    pub const LAST_BRANCH: &str = "└── ";
    pub const PIPE: &str = "│   ";
    pub const GAP: &str = "    ";

    pub const PLAY: &str = "▶";
    pub const DOT: &str = "•";
    pub const HOLLOW: &str = "○";
    pub const DIAMOND: &str = "◆";
    pub const OK: &str = "✓";
    pub const FAIL: &str = "✗";
    pub const WARN: &str = "⚠";
    pub const INFO: &str = "ℹ";
}

use glyphs::Border;

/// Prints `border` spanning `widths` columns, each padded by one space on both sides.
fn print_border(indent: &str, border: &Border, widths: &[usize], color: CtColor) {
    let segments: Vec<String> = widths.iter().map(|w| border.fill.repeat(w + 2)).collect();
    let line = format!(
        "{}{}{}",
        border.left,
        segments.join(border.junction),
        border.right
    );
    println!("{}{}", indent, line.with(color));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

const BANNER: [&str; 6] = [
    "███╗   ███╗██╗███╗   ██╗██╗████████╗██╗   ██╗██████╗ ███████╗",
    "████╗ ████║██║████╗  ██║██║╚══██╔══╝██║   ██║██╔══██╗██╔════╝",
    "██╔████╔██║██║██╔██╗ ██║██║   ██║   ██║   ██║██████╔╝█████╗  ",
    "██║╚██╔╝██║██║██║╚██╗██║██║   ██║   ██║   ██║██╔══██╗██╔══╝  ",
    "██║ ╚═╝ ██║██║██║ ╚████║██║   ██║   ╚██████╔╝██████╔╝███████╗",
    "╚═╝     ╚═╝╚═╝╚═╝  ╚═══╝╚═╝   ╚═╝    ╚═════╝ ╚═════╝ ╚══════╝",
];

fn print_banner() {
    println!();
    let shades = [
        colors::RED,
        colors::RED,
        colors::CORAL,
        colors::CORAL,
        colors::AMBER,
        colors::AMBER,
    ];
    for (line, shade) in BANNER.iter().zip(shades) {
        println!("    {}", line.with(shade).bold());
    }
    println!(
        "    {}",
        "── in-memory video engine ──".with(colors::DIM).attribute(Attribute::Italic)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status lines
// ═══════════════════════════════════════════════════════════════════════════════

fn print_status(symbol: &str, color: CtColor, message: &str) {
    println!(" {} {}", symbol.with(color).bold(), message.with(color));
}

pub fn print_success(message: &str) {
    print_status(glyphs::OK, colors::GREEN, message);
}

pub fn print_error(message: &str) {
    print_status(glyphs::FAIL, colors::RED, message);
}

pub fn print_warning(message: &str) {
    print_status(glyphs::WARN, colors::AMBER, message);
}

pub fn print_info(message: &str) {
    print_status(glyphs::INFO, colors::BLUE, message);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Panels
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_section_header(title: &str) {
    let label = format!(" {} ", title);
    let remaining = PANEL_WIDTH.saturating_sub(label.width());
    let left = remaining / 2;

    println!();
    println!(
        "{}{}{}{}{}",
        glyphs::PANEL_TOP.left.with(colors::RED),
        glyphs::PANEL_TOP.fill.repeat(left).with(colors::RED),
        label.with(colors::WHITE).bold(),
        glyphs::PANEL_TOP.fill.repeat(remaining - left).with(colors::RED),
        glyphs::PANEL_TOP.right.with(colors::RED)
    );
}

pub fn print_section_footer() {
    print_border("", &glyphs::PANEL_BOTTOM, &[PANEL_WIDTH - 2], colors::RED);
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        glyphs::DOT.with(colors::CORAL),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

/// Key/value line for the headline field of a panel.
pub fn print_key_value_highlight(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        glyphs::DIAMOND.with(colors::RED),
        format!("{}:", key).with(colors::WHITE).bold(),
        value.with(colors::AMBER).bold()
    );
}

pub fn print_list_item(item: &str, indent: usize) {
    print_list_item_styled(item, colors::WHITE, indent);
}

pub fn print_list_item_styled(item: &str, color: CtColor, indent: usize) {
    println!(
        "{}{} {}",
        "  ".repeat(indent + 1),
        glyphs::PLAY.with(colors::RED),
        item.with(color)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        glyphs::HOLLOW.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

/// One line of a category tree. `last_flags` holds, for each node from the
/// root's child down to this one, whether it is the last of its siblings.
/// An empty slice draws the root.
pub fn print_tree_line(last_flags: &[bool], label: &str, detail: &str) {
    let mut prefix = String::from("  ");
    if let Some((is_last, ancestors)) = last_flags.split_last() {
        for last in ancestors {
            prefix.push_str(if *last { glyphs::GAP } else { glyphs::PIPE });
        }
        prefix.push_str(if *is_last {
            glyphs::LAST_BRANCH
        } else {
            glyphs::BRANCH
        });
    }
    println!(
        "{}{} {}",
        prefix.with(colors::DIM),
        label.with(colors::WHITE).bold(),
        detail.with(colors::DIM)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tables
// ═══════════════════════════════════════════════════════════════════════════════

/// Column-aligned table. Widths are measured in terminal cells.
pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: Vec<&str>) -> Self {
        TableBuilder {
            widths: headers.iter().map(|h| h.width()).collect(),
            headers: headers.into_iter().map(String::from).collect(),
            rows: Vec::new(),
        }
    }

    /// Cells past the header count are dropped.
    pub fn add_row(&mut self, mut row: Vec<String>) {
        row.truncate(self.widths.len());
        for (width, cell) in self.widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.width());
        }
        self.rows.push(row);
    }

    fn print_cells(&self, cells: &[String], header: bool) {
        let mut line = glyphs::RULE.with(colors::RED).to_string();
        for (idx, width) in self.widths.iter().enumerate() {
            let cell = cells.get(idx).map(String::as_str).unwrap_or("");
            let padded = format!(" {}{} ", cell, " ".repeat(width.saturating_sub(cell.width())));
            let styled = if header {
                padded.with(colors::WHITE).bold().to_string()
            } else {
                padded.with(colors::WHITE).to_string()
            };
            line.push_str(&styled);
            line.push_str(&glyphs::RULE.with(colors::RED).to_string());
        }
        println!("{}", line);
    }

    pub fn print(&self) {
        print_border("", &glyphs::PANEL_TOP, &self.widths, colors::RED);
        self.print_cells(&self.headers, true);
        print_border("", &glyphs::PANEL_MIDDLE, &self.widths, colors::RED);
        for row in &self.rows {
            self.print_cells(row, false);
        }
        print_border("", &glyphs::PANEL_BOTTOM, &self.widths, colors::RED);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt
// ═══════════════════════════════════════════════════════════════════════════════

fn prompt_marker() -> String {
    format!("{} {}", "minitube".with(colors::RED).bold(), "❯".with(colors::WHITE).bold())
}

pub fn get_prompt() -> String {
    format!("{} ", prompt_marker())
}

pub fn print_command_echo(command: &str) {
    println!("{} {}", prompt_marker(), command.with(colors::GREEN).bold());
}

// ═══════════════════════════════════════════════════════════════════════════════
// Welcome
// ═══════════════════════════════════════════════════════════════════════════════

/// One framed line. `visible` is the printed width of `content` without escapes.
fn print_frame_line(content: &str, visible: usize) {
    println!(
        "  {}{}{}{}",
        glyphs::FRAME_SIDE.with(colors::RED),
        content,
        " ".repeat(WELCOME_WIDTH.saturating_sub(visible)),
        glyphs::FRAME_SIDE.with(colors::RED)
    );
}

pub fn print_welcome(owner: &str, seeded: bool) {
    print_banner();

    print_border("  ", &glyphs::FRAME_TOP, &[WELCOME_WIDTH - 2], colors::RED);

    let status = if seeded {
        "Sample catalog loaded"
    } else {
        "Empty catalog"
    };
    print_frame_line(
        &format!("  {}", status.with(colors::GREEN).bold()),
        status.width() + 2,
    );
    print_frame_line("", 0);

    for (key, value) in [
        ("Watching as", owner),
        ("Version", env!("CARGO_PKG_VERSION")),
        ("Build", env!("GIT_HASH")),
    ] {
        let label = format!("{}:", key);
        print_frame_line(
            &format!("  {} {}", label.as_str().with(colors::DIM), value),
            label.width() + value.width() + 3,
        );
    }

    print_frame_line("", 0);
    let hint = "  Type 'help' to list commands, 'exit' to leave";
    print_frame_line(&hint.with(colors::DIM).to_string(), hint.width());

    print_border("  ", &glyphs::FRAME_BOTTOM, &[WELCOME_WIDTH - 2], colors::RED);
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Help
// ═══════════════════════════════════════════════════════════════════════════════

pub struct CommandHelp {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
}

const HELP_GROUPS: [(&str, CtColor, &[&str]); 5] = [
    (
        "Library",
        colors::RED,
        &["videos", "show", "add-video", "add-category", "tree", "category", "search", "remove"],
    ),
    (
        "Engagement",
        colors::CORAL,
        &["play", "like", "dislike", "comment", "comments", "like-comment", "liked", "history"],
    ),
    (
        "Uploads & Suggestions",
        colors::AMBER,
        &["upload", "publish", "queue", "next", "reset", "suggestions", "suggest"],
    ),
    (
        "Playlists",
        colors::CYAN,
        &["playlists", "playlist", "new-playlist", "save", "unsave", "shuffle", "delete-playlist"],
    ),
    ("System", colors::BLUE, &["stats", "help", "exit"]),
];

pub fn print_help(commands: &[CommandHelp]) {
    print_section_header("Commands");
    println!();

    for (title, color, names) in HELP_GROUPS {
        println!("  {} {}", glyphs::DIAMOND.with(color), title.with(color).bold());
        for cmd in commands.iter().filter(|c| names.contains(&c.name)) {
            println!(
                "      {} {}  {}",
                cmd.name.with(colors::GREEN).bold(),
                cmd.args.with(colors::DIM),
                cmd.description.with(colors::WHITE)
            );
        }
        println!();
    }

    print_section_footer();
}

pub fn print_goodbye() {
    println!();
    println!(
        "  {} {}",
        glyphs::PLAY.with(colors::RED),
        "Thanks for watching. See you next time!".with(colors::WHITE).bold()
    );
    println!();
}

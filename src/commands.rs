use std::time::Duration;

use clap::{Parser, Subcommand};

use minitube::category::CategoryPath;
use minitube::engine::{EngagementSnapshot, Engine};
use minitube::error::EngineError;
use minitube::media::{
    format_clock_duration, parse_clock_duration, CommentId, NewVideo, ReactionKind, Video,
    VideoId, ViewerId,
};

use crate::cli_style::{
    colors, get_styles, print_empty_list, print_help, print_info, print_key_value,
    print_key_value_highlight, print_list_item, print_list_item_styled, print_section_footer,
    print_section_header, print_success, print_tree_line, print_warning, CommandHelp,
    TableBuilder,
};

fn parse_duration_arg(s: &str) -> Result<Duration, String> {
    parse_clock_duration(s).ok_or_else(|| format!("'{}' is not a m:ss or h:mm:ss duration", s))
}

#[derive(Parser)]
#[command(styles=get_styles(), name = "", disable_help_subcommand = true)]
pub struct InnerCli {
    #[command(subcommand)]
    pub command: InnerCommand,
}

#[derive(Subcommand)]
pub enum InnerCommand {
    /// Lists published videos.
    Videos,

    /// Shows details of a video.
    Show {
        id: VideoId,
        /// Print the video as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Creates a published video in a category ("/" is the root).
    AddVideo {
        title: String,
        category: CategoryPath,
        #[arg(long, value_parser = parse_duration_arg)]
        duration: Option<Duration>,
    },

    /// Adds a child category under the given parent path.
    AddCategory { parent: CategoryPath, name: String },

    /// Shows the category tree.
    Tree,

    /// Lists a category's videos, descendants included unless --direct.
    Category {
        path: CategoryPath,
        #[arg(long)]
        direct: bool,
    },

    /// Searches titles and categories.
    Search { query: String },

    /// Plays a video.
    Play {
        id: VideoId,
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Toggles a like on a video.
    Like {
        id: VideoId,
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Toggles a dislike on a video.
    Dislike {
        id: VideoId,
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Adds a comment to a video.
    Comment {
        id: VideoId,
        text: String,
        #[arg(long)]
        author: Option<String>,
    },

    /// Lists the comments of a video.
    Comments { id: VideoId },

    /// Toggles a like on a comment.
    LikeComment {
        video: VideoId,
        comment: CommentId,
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Queues a video for publication.
    Upload {
        title: String,
        category: CategoryPath,
        #[arg(long, value_parser = parse_duration_arg)]
        duration: Option<Duration>,
    },

    /// Publishes the oldest queued upload.
    Publish,

    /// Shows the upload queue.
    Queue,

    /// Advances to the next suggestion.
    Next,

    /// Rewinds the suggestions.
    Reset,

    /// Lists the suggestions.
    Suggestions,

    /// Appends a video to the suggestions.
    Suggest { id: VideoId },

    /// Lists playlists.
    Playlists,

    /// Shows the videos of a playlist.
    Playlist { name: String },

    /// Creates an empty playlist.
    NewPlaylist { name: String },

    /// Adds a video to a playlist.
    Save { playlist: String, id: VideoId },

    /// Removes a video from a playlist.
    Unsave { playlist: String, id: VideoId },

    /// Shuffles a playlist.
    Shuffle { playlist: String },

    /// Deletes a playlist.
    DeletePlaylist { name: String },

    /// Lists the videos a viewer likes.
    Liked {
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Shows the watch history, most recent first.
    History,

    /// Shows engine statistics.
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Removes a video everywhere.
    Remove { id: VideoId },

    /// Shows this help.
    Help,

    /// Close this program.
    Exit,
}

const fn help(name: &'static str, args: &'static str, description: &'static str) -> CommandHelp {
    CommandHelp {
        name,
        args,
        description,
    }
}

pub const COMMANDS: &[CommandHelp] = &[
    help("videos", "", "List published videos"),
    help("show", "<id> [--json]", "Show a video"),
    help("add-video", "<title> <category> [--duration m:ss]", "Create a published video"),
    help("add-category", "<parent> <name>", "Add a child category"),
    help("tree", "", "Show the category tree"),
    help("category", "<path> [--direct]", "List a category's videos"),
    help("search", "<query>", "Search titles and categories"),
    help("remove", "<id>", "Remove a video everywhere"),
    help("play", "<id> [--viewer]", "Play a video"),
    help("like", "<id> [--viewer]", "Toggle a like"),
    help("dislike", "<id> [--viewer]", "Toggle a dislike"),
    help("comment", "<id> <text> [--author]", "Comment on a video"),
    help("comments", "<id>", "List comments"),
    help("like-comment", "<video> <comment> [--viewer]", "Toggle a comment like"),
    help("liked", "[--viewer]", "Videos a viewer likes"),
    help("history", "", "Watch history"),
    help("upload", "<title> <category> [--duration m:ss]", "Queue an upload"),
    help("publish", "", "Publish the next upload"),
    help("queue", "", "Show pending uploads"),
    help("next", "", "Advance to the next suggestion"),
    help("reset", "", "Rewind suggestions"),
    help("suggestions", "", "List suggestions"),
    help("suggest", "<id>", "Append a suggestion"),
    help("playlists", "", "List playlists"),
    help("playlist", "<name>", "Show a playlist"),
    help("new-playlist", "<name>", "Create a playlist"),
    help("save", "<playlist> <id>", "Add a video to a playlist"),
    help("unsave", "<playlist> <id>", "Remove a video from a playlist"),
    help("shuffle", "<playlist>", "Shuffle a playlist"),
    help("delete-playlist", "<name>", "Delete a playlist"),
    help("stats", "[--json]", "Engine statistics"),
    help("help", "", "Show this help"),
    help("exit", "", "Close this program"),
];

#[derive(Debug, PartialEq, Eq)]
pub enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

impl From<EngineError> for CommandExecutionResult {
    fn from(err: EngineError) -> Self {
        CommandExecutionResult::Error(err.to_string())
    }
}

fn viewer_or_owner(engine: &Engine, viewer: Option<String>) -> ViewerId {
    viewer
        .map(ViewerId::from)
        .unwrap_or_else(|| engine.owner().clone())
}

fn duration_label(video: &Video) -> String {
    video
        .duration
        .map(format_clock_duration)
        .unwrap_or_else(|| "-".to_string())
}

fn print_videos<'a>(title: &str, videos: impl IntoIterator<Item = &'a Video>, empty: &str) {
    print_section_header(title);
    let mut table = TableBuilder::new(vec!["ID", "Title", "Category", "Length", "Views", "Likes"]);
    let mut count = 0;
    for video in videos {
        table.add_row(vec![
            video.id.to_string(),
            video.title.clone(),
            video.category.to_string(),
            duration_label(video),
            video.views().to_string(),
            video.likes().to_string(),
        ]);
        count += 1;
    }
    if count == 0 {
        print_empty_list(empty);
    } else {
        table.print();
    }
    print_section_footer();
}

fn print_ids(engine: &Engine, title: &str, ids: &[VideoId], empty: &str) {
    let videos: Vec<&Video> = ids.iter().filter_map(|id| engine.video(*id).ok()).collect();
    print_videos(title, videos, empty);
}

fn print_tree(engine: &Engine) {
    print_section_header("Categories");
    let rows = engine.category_outline();
    let mut flags: Vec<bool> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        if row.depth > 0 {
            let is_last = rows[i + 1..]
                .iter()
                .take_while(|r| r.depth >= row.depth)
                .all(|r| r.depth != row.depth);
            flags.truncate(row.depth - 1);
            flags.push(is_last);
        }
        let detail = format!("({} videos)", row.direct_videos);
        print_tree_line(&flags, &row.name, &detail);
    }
    print_section_footer();
}

fn reaction_label(reaction: Option<ReactionKind>) -> &'static str {
    match reaction {
        Some(ReactionKind::Like) => "liked",
        Some(ReactionKind::Dislike) => "disliked",
        None => "no reaction",
    }
}

fn print_engagement(engine: &Engine, snapshot: &EngagementSnapshot) {
    let title = engine
        .video(snapshot.video)
        .map(|v| v.title.clone())
        .unwrap_or_else(|_| snapshot.video.to_string());
    print_success(&format!(
        "{}: {} ({})",
        title,
        reaction_label(snapshot.reaction),
        snapshot.viewer
    ));
    print_key_value(
        "Reactions",
        &format!("{} likes, {} dislikes", snapshot.likes, snapshot.dislikes),
    );
    print_key_value(
        &format!("Liked by {}", snapshot.viewer),
        &snapshot.liked_videos.len().to_string(),
    );
}

pub fn execute_command(line: &str, engine: &mut Engine) -> CommandExecutionResult {
    let line = line.trim();
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    let cli = match cli {
        Ok(cli) => cli,
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            return CommandExecutionResult::Ok;
        }
    };

    match run(cli.command, engine) {
        Ok(result) => result,
        Err(err) => err.into(),
    }
}

fn run(command: InnerCommand, engine: &mut Engine) -> Result<CommandExecutionResult, EngineError> {
    match command {
        InnerCommand::Videos => {
            print_videos("Videos", engine.videos(), "No videos yet");
        }
        InnerCommand::Show { id, json } => {
            let video = engine.video(id)?;
            if json {
                match serde_json::to_string_pretty(video) {
                    Ok(text) => println!("{}", text),
                    Err(err) => return Ok(CommandExecutionResult::Error(err.to_string())),
                }
                return Ok(CommandExecutionResult::Ok);
            }
            print_section_header(&video.title);
            print_key_value("ID", &video.id.to_string());
            print_key_value("Category", &video.category.to_string());
            print_key_value("Length", &duration_label(video));
            print_key_value("State", &format!("{:?}", video.state()));
            print_key_value("Views", &video.views().to_string());
            print_key_value(
                "Reactions",
                &format!(
                    "{} likes, {} dislikes ({:.0}% liked)",
                    video.likes(),
                    video.dislikes(),
                    video.like_ratio()
                ),
            );
            print_key_value("Comments", &video.comments().len().to_string());
            print_section_footer();
        }
        InnerCommand::AddVideo {
            title,
            category,
            duration,
        } => {
            let mut new_video = NewVideo::new(title, category);
            if let Some(duration) = duration {
                new_video = new_video.with_duration(duration);
            }
            let id = engine.create_video_with(new_video)?;
            print_success(&format!("Created video {}", id));
        }
        InnerCommand::AddCategory { parent, name } => {
            let path = engine.add_category(&parent, &name)?;
            print_success(&format!("Created category {}", path));
        }
        InnerCommand::Tree => print_tree(engine),
        InnerCommand::Category { path, direct } => {
            let videos = engine.list_category(&path, !direct)?;
            print_videos(&format!("Category {}", path), videos, "No videos in this category");
        }
        InnerCommand::Search { query } => {
            let results = engine.search(&query);
            print_videos(&format!("Results for '{}'", query), results, "Nothing matched");
        }
        InnerCommand::Play { id, viewer } => {
            let viewer = viewer_or_owner(engine, viewer);
            let snapshot = engine.play(id, &viewer)?;
            let video = engine.video(id)?;
            print_key_value_highlight("Now playing", &video.to_string());
            print_key_value("Views", &snapshot.views.to_string());
            print_key_value(
                "History",
                &format!("{}/{}", snapshot.entries.len(), snapshot.capacity),
            );
        }
        InnerCommand::Like { id, viewer } => {
            let viewer = viewer_or_owner(engine, viewer);
            let snapshot = engine.like(id, &viewer)?;
            print_engagement(engine, &snapshot);
        }
        InnerCommand::Dislike { id, viewer } => {
            let viewer = viewer_or_owner(engine, viewer);
            let snapshot = engine.dislike(id, &viewer)?;
            print_engagement(engine, &snapshot);
        }
        InnerCommand::Comment { id, text, author } => {
            let author = author.unwrap_or_else(|| engine.owner().to_string());
            let comment = engine.add_comment(id, &author, &text)?;
            print_success(&format!("Added comment #{}", comment));
        }
        InnerCommand::Comments { id } => {
            let video = engine.video(id)?;
            print_section_header(&format!("Comments on {}", video.title));
            if video.comments().is_empty() {
                print_empty_list("No comments yet");
            }
            for comment in video.comments() {
                print_list_item(
                    &format!("#{} {} ({} likes)", comment.id, comment, comment.likes()),
                    0,
                );
            }
            print_section_footer();
        }
        InnerCommand::LikeComment {
            video,
            comment,
            viewer,
        } => {
            let viewer = viewer_or_owner(engine, viewer);
            let likes = engine.toggle_comment_like(video, comment, &viewer)?;
            print_success(&format!("Comment #{} now has {} likes", comment, likes));
        }
        InnerCommand::Upload {
            title,
            category,
            duration,
        } => {
            let mut new_video = NewVideo::new(title, category);
            if let Some(duration) = duration {
                new_video = new_video.with_duration(duration);
            }
            let id = engine.enqueue_upload(new_video)?;
            print_success(&format!(
                "Queued upload {} ({} pending)",
                id,
                engine.pending_uploads().count()
            ));
        }
        InnerCommand::Publish => {
            let id = engine.publish_next()?;
            print_success(&format!("Published {}", engine.video(id)?));
        }
        InnerCommand::Queue => {
            print_section_header("Upload queue");
            let mut empty = true;
            for (position, video) in engine.pending_uploads().enumerate() {
                print_list_item(&format!("{}. [{}] {}", position + 1, video.id, video), 0);
                empty = false;
            }
            if empty {
                print_empty_list("Nothing waiting to be published");
            }
            print_section_footer();
        }
        InnerCommand::Next => {
            let id = engine.advance_suggestion()?;
            print_key_value_highlight("Up next", &engine.video(id)?.to_string());
        }
        InnerCommand::Reset => {
            engine.reset_suggestions();
            print_info("Suggestions rewound");
        }
        InnerCommand::Suggestions => {
            let current = engine.current_suggestion().ok();
            print_section_header("Suggestions");
            let mut empty = true;
            for video in engine.suggestions() {
                let label = format!("[{}] {}", video.id, video);
                if Some(video.id) == current {
                    print_list_item_styled(&label, colors::GREEN, 0);
                } else {
                    print_list_item(&label, 0);
                }
                empty = false;
            }
            if empty {
                print_empty_list("No suggestions");
            }
            print_section_footer();
        }
        InnerCommand::Suggest { id } => {
            engine.suggest(id)?;
            print_success(&format!("Added {} to suggestions", id));
        }
        InnerCommand::Playlists => {
            print_section_header("Playlists");
            let mut table = TableBuilder::new(vec!["Name", "Videos", "Kind"]);
            for summary in engine.list_playlists() {
                table.add_row(vec![
                    summary.name,
                    summary.count.to_string(),
                    if summary.system { "system" } else { "custom" }.to_string(),
                ]);
            }
            table.print();
            print_section_footer();
        }
        InnerCommand::Playlist { name } => {
            let ids = engine.playlist_videos(&name)?;
            print_ids(engine, &name, &ids, "This playlist is empty");
        }
        InnerCommand::NewPlaylist { name } => {
            engine.create_playlist(&name)?;
            print_success(&format!("Created playlist {}", name.trim()));
        }
        InnerCommand::Save { playlist, id } => {
            if engine.add_to_playlist(&playlist, id)? {
                print_success(&format!("Saved {} to {}", id, playlist));
            } else {
                print_warning(&format!("{} is already in {}", id, playlist));
            }
        }
        InnerCommand::Unsave { playlist, id } => {
            if engine.remove_from_playlist(&playlist, id)? {
                print_success(&format!("Removed {} from {}", id, playlist));
            } else {
                print_warning(&format!("{} was not in {}", id, playlist));
            }
        }
        InnerCommand::Shuffle { playlist } => {
            engine.shuffle_playlist(&playlist)?;
            print_success(&format!("Shuffled {}", playlist));
        }
        InnerCommand::DeletePlaylist { name } => {
            engine.delete_playlist(&name)?;
            print_success(&format!("Deleted playlist {}", name));
        }
        InnerCommand::Liked { viewer } => {
            let viewer = viewer_or_owner(engine, viewer);
            let ids = engine.liked_videos(&viewer);
            print_ids(
                engine,
                &format!("Liked by {}", viewer),
                &ids,
                "No liked videos",
            );
        }
        InnerCommand::History => {
            print_section_header("History");
            let mut empty = true;
            for event in engine.history() {
                let title = engine
                    .video(event.video)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|_| event.video.to_string());
                print_list_item(&format!("{} (by {})", title, event.viewer), 0);
                empty = false;
            }
            if empty {
                print_empty_list("Nothing played yet");
            }
            print_section_footer();
        }
        InnerCommand::Stats { json } => {
            let stats = engine.stats();
            if json {
                match serde_json::to_string_pretty(&stats) {
                    Ok(text) => println!("{}", text),
                    Err(err) => return Ok(CommandExecutionResult::Error(err.to_string())),
                }
                return Ok(CommandExecutionResult::Ok);
            }
            print_section_header("Stats");
            print_key_value("Videos", &stats.total_videos.to_string());
            print_key_value("Pending uploads", &stats.pending_uploads.to_string());
            print_key_value("Playlists", &stats.playlists.to_string());
            print_key_value("History items", &stats.history_items.to_string());
            print_key_value("Total likes", &stats.total_likes.to_string());
            print_key_value("Total comments", &stats.total_comments.to_string());
            print_key_value(
                &format!("Liked by {}", engine.owner()),
                &stats.owner_liked.to_string(),
            );
            print_section_footer();
        }
        InnerCommand::Remove { id } => {
            let video = engine.remove_video(id)?;
            print_success(&format!("Removed {}", video));
        }
        InnerCommand::Help => print_help(COMMANDS),
        InnerCommand::Exit => return Ok(CommandExecutionResult::Exit),
    }
    Ok(CommandExecutionResult::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minitube::config::EngineSettings;

    fn engine() -> Engine {
        Engine::new(EngineSettings::default()).unwrap()
    }

    #[test]
    fn test_blank_line_is_noop() {
        let mut engine = engine();
        assert_eq!(execute_command("   ", &mut engine), CommandExecutionResult::Ok);
    }

    #[test]
    fn test_exit_command() {
        let mut engine = engine();
        assert_eq!(execute_command("exit", &mut engine), CommandExecutionResult::Exit);
    }

    #[test]
    fn test_add_video_and_play() {
        let mut engine = engine();
        assert_eq!(
            execute_command("add-video \"Rust Basics\" / --duration 4:05", &mut engine),
            CommandExecutionResult::Ok
        );
        let video = engine.videos().next().unwrap();
        assert_eq!(video.title, "Rust Basics");
        assert_eq!(video.duration, Some(Duration::from_secs(245)));

        let line = format!("play {}", video.id);
        assert_eq!(execute_command(&line, &mut engine), CommandExecutionResult::Ok);
        assert_eq!(engine.history().count(), 1);
    }

    #[test]
    fn test_oversized_duration_is_rejected_by_parser() {
        let mut engine = engine();
        assert_eq!(
            execute_command("add-video Long / --duration 307445734561825861:00", &mut engine),
            CommandExecutionResult::Ok
        );
        assert_eq!(engine.videos().count(), 0);
    }

    #[test]
    fn test_engine_error_is_reported() {
        let mut engine = engine();
        match execute_command("play 42", &mut engine) {
            CommandExecutionResult::Error(message) => assert!(message.contains("42")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_unknown_command_does_not_fail_the_shell() {
        let mut engine = engine();
        assert_eq!(
            execute_command("definitely-not-a-command", &mut engine),
            CommandExecutionResult::Ok
        );
    }

    #[test]
    fn test_playlist_commands() {
        let mut engine = engine();
        execute_command("add-video Clip /", &mut engine);
        let id = engine.videos().next().unwrap().id;

        assert_eq!(
            execute_command("new-playlist \"Road Trip\"", &mut engine),
            CommandExecutionResult::Ok
        );
        let line = format!("save \"Road Trip\" {}", id);
        assert_eq!(execute_command(&line, &mut engine), CommandExecutionResult::Ok);
        assert_eq!(engine.playlist_videos("Road Trip").unwrap(), vec![id]);
    }
}

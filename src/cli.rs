mod reply;

use std::error::Error;
use std::io::{stdin, stdout, BufRead, BufReader, Write};
use std::str::FromStr;

use clap::{Arg, ArgMatches, Command};
use itertools::Itertools;

use crate::context::{Context, CURRENT_DRAFT_ID_KEY, FORMAT_KEY, OUR_SIDE_KEY};
use crate::draft::DraftSession;
use crate::models::champion::Role;
use crate::models::draft_format::{Format, Side};
use crate::models::profile::{NewProfileEntry, ProfileEntryPatch, Tier};
use crate::opt::*;
use crate::provider::*;

use self::reply::*;

const CUSTOM_FORMAT_KEY: &str = "custom";
const ROLE_NAMES: [&str; 5] = ["top", "jungle", "mid", "adc", "support"];

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Cli);
}

/// Everything the REPL commands act on.
pub struct Repl<'a> {
    pub session: DraftSession,
    pub formats: FormatLoader,
    pub champions: ChampionLoader,
    pub matcher: ChampionMatcher,
    pub profiles: ProfileStore,
    pub context: &'a Context,
}

impl<'a> Repl<'a> {
    fn remember(&self, key: &str, value: &str) {
        if let Err(err) = self.context.write_data(key, value) {
            log(format!("Unable to save {}: {}", key, err));
        }
    }

    fn use_format(&mut self, key: &str, format: Format) -> Res<()> {
        self.session.set_format(key, format)?;
        self.remember(FORMAT_KEY, key);
        self.remember(CURRENT_DRAFT_ID_KEY, self.session.id());
        Ok(())
    }
}

pub async fn main(repl: &mut Repl<'_>) -> Result<(), Box<dyn Error>> {
    run_loop(repl, &mut BufReader::new(stdin()), &mut stdout()).await
}

/// Reads commands until `quit` or the end of input.
async fn run_loop<R: BufRead, W: Write>(
    repl: &mut Repl<'_>,
    input: &mut R,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    writeln!(out, "{}", status_text(&repl.session, &repl.session.status()))?;

    while let Some(line) = readline(input, out)? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(repl, line, out).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(out, "{err}")?;
                out.flush()?;
            }
        }
    }

    Ok(())
}

fn joined(matches: &ArgMatches, id: &str) -> String {
    matches
        .get_many::<String>(id)
        .map(|mut values| values.join(" "))
        .unwrap_or_default()
}

fn role_arg(matches: &ArgMatches) -> Res<Option<Role>> {
    matches
        .get_one::<String>("role")
        .map(|role| Role::from_str(role).err_to_str())
        .transpose()
}

pub async fn respond<W: Write>(
    repl: &mut Repl<'_>,
    line: &str,
    out: &mut W,
) -> Result<bool, Box<dyn Error>> {
    let args = shlex::split(line).ok_or("error: Invalid quoting")?;
    let matches = cli().try_get_matches_from(args)?;
    let mut reply = Reply::new();

    match matches.subcommand() {
        Some(("ping", _matches)) => {
            reply.add("Pong".to_string());
        }
        Some(("quit", _matches)) => {
            writeln!(out, "Exiting ...")?;
            out.flush()?;
            return Ok(true);
        }
        Some(("status", _matches)) => {
            reply.add(status_text(&repl.session, &repl.session.status()));
        }
        Some(("board", _matches)) => {
            reply.add_boxed(board_text(&repl.session));
            let is_first_pick = repl.session.state().is_first_pick();
            reply.add(format!("First pick: {}", if is_first_pick { "on" } else { "off" }));
            reply.add(status_text(&repl.session, &repl.session.status()));
        }
        Some(("timeline", _matches)) => {
            reply.add_boxed(timeline_text(&repl.session));
        }
        Some(("pick", matches)) => {
            let champion = repl.matcher.find(&joined(matches, "champion"))?;
            let slot = repl.session.pick(champion.clone())?;
            reply.add(format!("{} {} {}: {}", slot.side, slot.kind, slot.index + 1, champion.name));
            reply.add(status_text(&repl.session, &repl.session.status()));
        }
        Some(("undo", _matches)) => {
            repl.session.undo();
            reply.add(status_text(&repl.session, &repl.session.status()));
        }
        Some(("reset", _matches)) => {
            repl.session.reset();
            repl.remember(CURRENT_DRAFT_ID_KEY, repl.session.id());
            reply.add(status_text(&repl.session, &repl.session.status()));
        }
        Some(("side", matches)) => {
            let side = Side::from_str(&joined(matches, "side")).err_to_str()?;
            repl.session.set_our_side(side);
            repl.remember(OUR_SIDE_KEY, &side.to_string());
            reply.add(format!("Playing {}", side));
            reply.add(status_text(&repl.session, &repl.session.status()));
        }
        Some(("first", matches)) => {
            let is_first_pick = joined(matches, "state") == "on";
            repl.session.set_first_pick(is_first_pick);
            reply.add(format!("First pick: {}", if is_first_pick { "on" } else { "off" }));
        }
        Some(("formats", _matches)) => {
            let formats = repl.formats.list_formats().await?;
            reply.add_boxed(
                formats
                    .iter()
                    .map(|(key, format)| {
                        format!("{:12} {:20} {} turns", key, format.name, format.total_turns())
                    })
                    .join("\n"),
            );
        }
        Some(("format", matches)) => {
            let key = joined(matches, "key");
            let format = repl.formats.get_format(&key).await?;
            let compact = format.to_compact();
            repl.use_format(&key, format)?;
            reply.add(format!("Format [{}]: {}", key, compact));
            reply.add(status_text(&repl.session, &repl.session.status()));
        }
        Some(("custom", matches)) => {
            let format = Format::parse_compact(CUSTOM_FORMAT_KEY, &joined(matches, "phases"))?;
            repl.use_format(CUSTOM_FORMAT_KEY, format)?;
            reply.add(status_text(&repl.session, &repl.session.status()));
        }
        Some(("taken", _matches)) => {
            let mut names = Vec::new();
            for id in repl.session.taken_champion_ids() {
                let name = repl.champions.get_champion(&id).await?.map_or(id, |c| c.name);
                names.push(name);
            }
            reply.add(if names.is_empty() {
                "Nothing taken yet".to_string()
            } else {
                names.iter().sorted().join(", ")
            });
        }
        Some(("champions", matches)) => {
            let role = role_arg(matches)?;
            let taken = repl.session.taken_champion_ids();
            let champions = repl.champions.list_champions().await?;
            reply.add_boxed(
                champions
                    .iter()
                    .filter(|c| role.map_or(true, |role| c.plays(role)))
                    .map(|c| {
                        let marker = if taken.contains(&c.id) { "x" } else { " " };
                        format!("{} {}", marker, c.to_text())
                    })
                    .join("\n"),
            );
        }
        Some(("suggest", matches)) => {
            let profile_name = matches.get_one::<String>("profile").map(String::as_str);
            let request = repl
                .session
                .recommendation_request(profile_name, role_arg(matches)?)
                .ok_or("Nothing to suggest, the draft has no open turn")?;
            let limit = *matches
                .get_one::<usize>("limit")
                .unwrap_or(&DEFAULT_RECOMMENDATION_LIMIT);
            let recs = ProfileRecommender::new(repl.champions.champions(), &repl.profiles)
                .with_limit(limit)
                .recommend(&request)
                .await?;
            reply.add(format!(
                "Suggestions for {} {} (phase {}, turn {})",
                request.target.side,
                request.target.kind,
                request.target.phase_index + 1,
                request.target.global_index + 1
            ));
            reply.add_boxed(recommendations_text(&recs));
        }
        Some(("profiles", _matches)) => {
            let profiles = repl.profiles.list_profiles().await?;
            reply.add(if profiles.is_empty() { "No profiles".to_string() } else { profiles.join(", ") });
        }
        Some(("entries", matches)) => {
            let profile_name = joined(matches, "profile");
            let role = role_arg(matches)?.ok_or("Role is required")?;
            let entries = repl.profiles.list_entries(&profile_name, role).await?;
            reply.add_boxed(
                entries
                    .iter()
                    .map(|entry| format!("{} [{}] {} {}", entry.id, entry.tier, entry.champion_id, entry.note))
                    .join("\n"),
            );
        }
        Some(("add-entry", matches)) => {
            let champion = repl.matcher.find(&joined(matches, "champion"))?;
            let role = role_arg(matches)?.ok_or("Role is required")?;
            let tier = Tier::from_str(&joined(matches, "tier")).err_to_str()?;
            let entry = repl
                .profiles
                .create_entry(NewProfileEntry::new(&joined(matches, "profile"), role, &champion.id, tier))
                .await?;
            reply.add(format!("Added {} to [{}] {} as {} ({})", champion.name, entry.profile_name, role, tier, entry.id));
        }
        Some(("set-tier", matches)) => {
            let tier = Tier::from_str(&joined(matches, "tier")).err_to_str()?;
            let patch = ProfileEntryPatch {
                tier: Some(tier),
                note: matches.get_one::<String>("note").cloned(),
                ..Default::default()
            };
            let entry = repl.profiles.update_entry(&joined(matches, "id"), patch).await?;
            reply.add(format!("{} in [{}] {} is now {}", entry.champion_id, entry.profile_name, entry.role, entry.tier));
        }
        Some(("del-entry", matches)) => {
            let id = joined(matches, "id");
            repl.profiles.delete_entry(&id).await?;
            reply.add(format!("Deleted {}", id));
        }
        Some((name, _matches)) => return Err(format!("error: Unknown command [{}]", name).into()),
        None => unreachable!("subcommand required"),
    }

    writeln!(out, "{}", reply)?;
    out.flush()?;
    Ok(false)
}

fn cli() -> Command {
    // strip out usage
    const PARSER_TEMPLATE: &str = "\
        {all-args}
    ";
    // strip out name/version
    const COMMAND_TEMPLATE: &str = "\
        {about-with-newline}\n\
        {usage-heading}\n    {usage}\n\
        \n\
        {all-args}{after-help}\
    ";

    let command = |name: &'static str, about: &'static str| {
        Command::new(name).about(about).help_template(COMMAND_TEMPLATE)
    };
    let words = |id: &'static str| Arg::new(id).required(true).num_args(1..);

    Command::new("repl")
        .multicall(true)
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand_value_name("COMMAND")
        .subcommand_help_heading("COMMANDS")
        .help_template(PARSER_TEMPLATE)
        .subcommand(command("ping", "Get a response"))
        .subcommand(command("status", "Show whose turn it is").alias("s"))
        .subcommand(command("board", "Show picks and bans").alias("b"))
        .subcommand(command("timeline", "Show every turn of the format"))
        .subcommand(command("pick", "Fill the current turn with a champion").alias("p").arg(words("champion")))
        .subcommand(command("undo", "Revert the last turn").alias("u"))
        .subcommand(command("reset", "Start the draft over"))
        .subcommand(
            command("side", "Choose the side we play")
                .arg(Arg::new("side").required(true).value_parser(["blue", "red"])),
        )
        .subcommand(
            command("first", "Mark whether we have first pick")
                .arg(Arg::new("state").required(true).value_parser(["on", "off"])),
        )
        .subcommand(command("formats", "List available formats"))
        .subcommand(command("format", "Load a format by key").arg(Arg::new("key").required(true)))
        .subcommand(
            command("custom", "Load a format like `ban blue 3, ban red 3, pick blue 1`").arg(words("phases")),
        )
        .subcommand(command("taken", "List champions already picked or banned"))
        .subcommand(
            command("champions", "List the champion catalog")
                .alias("c")
                .arg(Arg::new("role").value_parser(ROLE_NAMES)),
        )
        .subcommand(
            command("suggest", "Suggest champions for the current turn")
                .arg(Arg::new("profile"))
                .arg(Arg::new("role").value_parser(ROLE_NAMES))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(command("profiles", "List profiles"))
        .subcommand(
            command("entries", "List profile entries for a role")
                .arg(Arg::new("profile").required(true))
                .arg(Arg::new("role").required(true).value_parser(ROLE_NAMES)),
        )
        .subcommand(
            command("add-entry", "Add a champion to a profile")
                .arg(Arg::new("profile").required(true))
                .arg(Arg::new("role").required(true).value_parser(ROLE_NAMES))
                .arg(words("champion"))
                .arg(
                    Arg::new("tier")
                        .long("tier")
                        .short('t')
                        .value_parser(["S", "A", "B", "C", "D"])
                        .default_value("B"),
                ),
        )
        .subcommand(
            command("set-tier", "Change the tier of a profile entry")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("tier").required(true).value_parser(["S", "A", "B", "C", "D"]))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(command("del-entry", "Remove a profile entry").arg(Arg::new("id").required(true)))
        .subcommand(
            command("quit", "Quit the REPL")
                .alias("exit")
                .alias("q")
                .alias(":q"),
        )
}

/// None at end of input.
fn readline<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<String>, Box<dyn Error>> {
    write!(out, "> ")?;
    out.flush()?;
    let mut buffer = String::new();
    if input.read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::context::load_data_from_file;
    use crate::draft::DEFAULT_SLOT_CAPACITY;

    const FORMATS: &str = r#"{
        "duel": {"name": "Duel", "phases": [
            {"type": "pick", "side": "blue", "count": 1},
            {"type": "pick", "side": "red", "count": 1}
        ]}
    }"#;

    const CHAMPIONS: &str = r#"[
        {"id": "ahri", "name": "Ahri", "roles": ["mid"]},
        {"id": "syndra", "name": "Syndra", "roles": ["mid"]},
        {"id": "jinx", "name": "Jinx", "roles": ["adc"]}
    ]"#;

    struct Fixture {
        dir: tempfile::TempDir,
        context: Context,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().expect("Failed to create a temp dir");
        std::fs::write(dir.path().join("draft_formats.json"), FORMATS).unwrap();
        std::fs::write(dir.path().join("champions.json"), CHAMPIONS).unwrap();
        let context = load_data_from_file(&dir.path().join("runtime_data.json")).unwrap();
        Fixture { dir, context }
    }

    async fn build_repl<'a>(dir: &Path, context: &'a Context) -> Repl<'a> {
        let champions = ChampionLoader::load(dir).await.unwrap();
        Repl {
            session: DraftSession::new(Side::Blue, DEFAULT_SLOT_CAPACITY),
            formats: FormatLoader::new(dir, DEFAULT_SLOT_CAPACITY),
            matcher: champions.matcher(),
            champions,
            profiles: ProfileStore::open(dir).await.unwrap(),
            context,
        }
    }

    async fn run(repl: &mut Repl<'_>, line: &str) -> Result<String, String> {
        let mut out = Vec::new();
        respond(repl, line, &mut out)
            .await
            .map_err(|err| err.to_string())?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_pick_and_undo() {
        let fx = fixture();
        let mut repl = build_repl(fx.dir.path(), &fx.context).await;

        let out = run(&mut repl, "format duel").await.unwrap();
        assert!(out.contains("Format [duel]: pick blue 1, pick red 1"), "{}", out);
        assert_eq!(fx.context.read_data(FORMAT_KEY), Some("duel".to_string()));

        let out = run(&mut repl, "pick ahri").await.unwrap();
        assert!(out.contains("blue pick 1: Ahri"), "{}", out);
        assert!(out.contains("red pick into slot 1 (their turn)"), "{}", out);

        let err = run(&mut repl, "pick Ahri").await.unwrap_err();
        assert!(err.contains("already picked or banned"));

        run(&mut repl, "undo").await.unwrap();
        assert_eq!(repl.session.state().cursor(), 0);
        assert!(run(&mut repl, "taken").await.unwrap().contains("Nothing taken yet"));
    }

    #[tokio::test]
    async fn test_side_is_remembered() {
        let fx = fixture();
        let mut repl = build_repl(fx.dir.path(), &fx.context).await;

        run(&mut repl, "side red").await.unwrap();
        assert_eq!(repl.session.state().our_side(), Side::Red);
        assert_eq!(fx.context.our_side(), Some(Side::Red));
        assert!(run(&mut repl, "side green").await.is_err());
    }

    #[tokio::test]
    async fn test_custom_format() {
        let fx = fixture();
        let mut repl = build_repl(fx.dir.path(), &fx.context).await;

        run(&mut repl, "custom ban blue 1, ban red 2").await.unwrap();
        assert_eq!(repl.session.timeline().len(), 3);
        assert_eq!(repl.session.format_key(), Some(CUSTOM_FORMAT_KEY));
        assert!(run(&mut repl, "custom ban blue 9").await.is_err());
    }

    #[tokio::test]
    async fn test_profiles_and_suggest() {
        let fx = fixture();
        let mut repl = build_repl(fx.dir.path(), &fx.context).await;
        run(&mut repl, "format duel").await.unwrap();

        let out = run(&mut repl, "add-entry main mid syndra -t S").await.unwrap();
        assert!(out.contains("Added Syndra to [main] mid as S"), "{}", out);
        assert!(run(&mut repl, "profiles").await.unwrap().contains("main"));

        let out = run(&mut repl, "suggest main mid").await.unwrap();
        assert!(out.contains("Suggestions for blue pick (phase 1, turn 1)"), "{}", out);
        let syndra = out.find("Syndra").unwrap();
        let ahri = out.find("Ahri").unwrap();
        assert!(syndra < ahri, "{}", out);
        assert!(!out.contains("Jinx"));

        let out = run(&mut repl, "suggest main mid -n 1").await.unwrap();
        assert!(out.contains("Syndra") && !out.contains("Ahri"), "{}", out);

        let id = repl.profiles.list_entries("main", Role::Mid).await.unwrap()[0].id.clone();
        let out = run(&mut repl, &format!("set-tier {} C --note later", id)).await.unwrap();
        assert!(out.contains("syndra in [main] mid is now C"), "{}", out);
        let out = run(&mut repl, "suggest main mid").await.unwrap();
        assert!(out.contains("[20] C tier in main mid"), "{}", out);
    }

    #[tokio::test]
    async fn test_champions_list() {
        let fx = fixture();
        let mut repl = build_repl(fx.dir.path(), &fx.context).await;
        run(&mut repl, "format duel").await.unwrap();
        run(&mut repl, "pick jinx").await.unwrap();

        let out = run(&mut repl, "champions adc").await.unwrap();
        assert!(out.contains("x Jinx"), "{}", out);
        assert!(!out.contains("Ahri"));
        assert_eq!(run(&mut repl, "taken").await.unwrap().trim(), "Jinx");
    }

    #[tokio::test]
    async fn test_loop_stops_at_end_of_input() {
        let fx = fixture();
        let mut repl = build_repl(fx.dir.path(), &fx.context).await;

        let mut out = Vec::new();
        run_loop(&mut repl, &mut std::io::Cursor::new(""), &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No format loaded"), "{}", text);
        assert_eq!(text.matches("> ").count(), 1);

        let mut out = Vec::new();
        let input = "format duel\n\npick ahri\nbogus\n";
        run_loop(&mut repl, &mut std::io::Cursor::new(input), &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("blue pick 1: Ahri"), "{}", text);
        assert!(text.contains("bogus"), "{}", text);
        assert_eq!(repl.session.state().cursor(), 1);
    }

    #[tokio::test]
    async fn test_misc_commands() {
        let fx = fixture();
        let mut repl = build_repl(fx.dir.path(), &fx.context).await;

        assert!(run(&mut repl, "ping").await.unwrap().contains("Pong"));
        assert!(run(&mut repl, "status").await.unwrap().contains("No format loaded"));
        assert!(run(&mut repl, "formats").await.unwrap().contains("duel"));
        assert!(run(&mut repl, "suggest").await.is_err());
        assert!(run(&mut repl, "bogus").await.is_err());
        assert!(run(&mut repl, "pick 'ahri").await.unwrap_err().contains("Invalid quoting"));

        let mut out = Vec::new();
        assert!(respond(&mut repl, "quit", &mut out).await.unwrap());
    }
}

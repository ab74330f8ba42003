//! `review` command-line entrypoint.

use anyhow::{Context, Result, bail};

use review::config::Config;
use review::merge::PendingEdits;
use review::record::Label;
use review::session::{PageView, ReviewSession};
use review::storage::{FsRecordStore, RecordSetLister};

const USAGE: &str = "\
usage:
  review list
  review voters <set>
  review show <set> <caption> [--voter V]... [--votes N]... [--page P]
  review label <set> <caption> <path>=<True|False|Ambiguous>...
  review raw <set> <caption>";

#[derive(Debug)]
enum Command {
    List,
    Voters {
        set: String,
    },
    Show {
        set: String,
        caption: String,
        voters: Vec<String>,
        counts: Vec<usize>,
        page: usize,
    },
    Label {
        set: String,
        caption: String,
        edits: PendingEdits,
    },
    Raw {
        set: String,
        caption: String,
    },
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!("missing command\n{}", USAGE);
        };

        match name.as_str() {
            "list" => Ok(Command::List),
            "voters" => match rest {
                [set] => Ok(Command::Voters { set: set.clone() }),
                _ => bail!("voters takes exactly one record set\n{}", USAGE),
            },
            "show" => {
                let [set, caption, flags @ ..] = rest else {
                    bail!("show needs a record set and a caption\n{}", USAGE);
                };
                let mut voters = Vec::new();
                let mut counts = Vec::new();
                let mut page = 1;
                let mut flags = flags.iter();
                while let Some(flag) = flags.next() {
                    let value = flags
                        .next()
                        .with_context(|| format!("{} needs a value", flag))?;
                    match flag.as_str() {
                        "--voter" => voters.push(value.clone()),
                        "--votes" => counts.push(
                            value
                                .parse()
                                .with_context(|| format!("invalid vote count '{}'", value))?,
                        ),
                        "--page" => {
                            page = value
                                .parse()
                                .with_context(|| format!("invalid page '{}'", value))?
                        }
                        other => bail!("unknown flag '{}'\n{}", other, USAGE),
                    }
                }
                Ok(Command::Show {
                    set: set.clone(),
                    caption: caption.clone(),
                    voters,
                    counts,
                    page,
                })
            }
            "label" => {
                let [set, caption, pairs @ ..] = rest else {
                    bail!("label needs a record set and a caption\n{}", USAGE);
                };
                if pairs.is_empty() {
                    bail!("label needs at least one <path>=<label>\n{}", USAGE);
                }
                let mut edits = PendingEdits::new();
                for pair in pairs {
                    let (path, label) = pair
                        .rsplit_once('=')
                        .with_context(|| format!("expected <path>=<label>, got '{}'", pair))?;
                    let label: Label = label.parse()?;
                    edits.insert(path.to_string(), label);
                }
                Ok(Command::Label {
                    set: set.clone(),
                    caption: caption.clone(),
                    edits,
                })
            }
            "raw" => match rest {
                [set, caption] => Ok(Command::Raw {
                    set: set.clone(),
                    caption: caption.clone(),
                }),
                _ => bail!("raw needs a record set and a caption\n{}", USAGE),
            },
            other => bail!("unknown command '{}'\n{}", other, USAGE),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = Config::from_env()?;
    config.validate()?;

    tracing::debug!(
        annotations_dir = %config.annotations_dir.display(),
        page_size = config.page_size.get(),
        "Configuration loaded"
    );

    let store = config.record_store();
    let mut session = ReviewSession::new(store, config.pager());

    match command {
        Command::List => {
            let sets = session.store().list()?;
            if sets.is_empty() {
                println!(
                    "No record sets found in {}",
                    session.store().root().display()
                );
            }
            for set in sets {
                println!("{}", set);
            }
        }
        Command::Voters { set } => {
            session.open(&set)?;
            for voter in session.voters() {
                println!("{}", voter);
            }
        }
        Command::Show {
            set,
            caption,
            voters,
            counts,
            page,
        } => {
            session.open(&set)?;
            session.select_caption(&caption)?;
            session.set_voters(voters)?;
            session.set_vote_counts(counts)?;
            session.go_to_page(page)?;
            render(&session, config.row_width.get())?;
        }
        Command::Label {
            set,
            caption,
            edits,
        } => {
            session.open(&set)?;
            session.select_caption(&caption)?;
            let report = session.save(&edits)?;

            for fault in &report.outcome.faults {
                eprintln!("warning: consistency error: {}", fault);
            }
            if report.written {
                println!(
                    "Updated {} label(s) for caption '{}' and saved {}",
                    report.outcome.updated, caption, set
                );
            } else {
                println!("No actual changes to labels detected; nothing saved");
            }
        }
        Command::Raw { set, caption } => {
            session.open(&set)?;
            session.select_caption(&caption)?;
            println!("{}", session.raw_caption()?);
        }
    }

    Ok(())
}

fn render(session: &ReviewSession<FsRecordStore>, row_width: usize) -> Result<()> {
    let view: PageView = session.current_page()?;

    println!("Caption: {}", view.caption);
    if let Some(selection) = session.selection() {
        if !selection.voters.is_empty() {
            let voters: Vec<&str> = selection.voters.iter().map(String::as_str).collect();
            println!("Filtering images voted by: {}", voters.join(", "));
        }
        if !selection.vote_counts.is_empty() {
            let counts: Vec<String> = selection.vote_counts.iter().map(usize::to_string).collect();
            println!("Filtering images with vote counts: {}", counts.join(", "));
        }
    }
    let options: Vec<String> = session
        .vote_count_options()?
        .iter()
        .map(usize::to_string)
        .collect();
    println!("Vote-count options: {}", options.join(", "));
    println!("Displaying {} images matching filter.", view.total_items);
    println!("Page {} of {}", view.number, view.total_pages);

    if view.is_empty() {
        println!("No images match; try adjusting the filters.");
    }

    for row in view.rows(row_width) {
        println!("---");
        for item in row {
            let votes = if item.votes.is_empty() {
                "None".to_string()
            } else {
                item.votes.join(", ")
            };
            let marker = if item.explicit { "" } else { " (default)" };
            println!(
                "[{}] {} | votes: {} | label: {}{}",
                item.index, item.path, votes, item.label, marker
            );
        }
    }
    Ok(())
}

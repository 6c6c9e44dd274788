use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::info;

use course_runtime::app::print_summary;
use course_runtime::{
    load_replay_from_str, BestTimeStore, Course, CourseSession, JsonFileStore, MemoryStore,
    ZoneKind,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let xml = fs::read_to_string(&options.course_path)
        .with_context(|| format!("failed to read course {}", options.course_path))?;
    let course = Course::from_xml(&xml).context("failed to parse course XML")?;
    let replay = fs::read_to_string(&options.replay_path)
        .with_context(|| format!("failed to read replay {}", options.replay_path))?;
    let frames = load_replay_from_str(&replay).context("failed to parse replay")?;

    println!(
        "Loaded course {} with {} zones ({} start, {} finish)",
        course.name,
        course.zones.len(),
        course.count(ZoneKind::Start),
        course.count(ZoneKind::Finish)
    );

    let file_store = match options.save {
        SaveTarget::Disabled => None,
        SaveTarget::Path(ref path) => Some(JsonFileStore::new(path)),
        SaveTarget::DataDir => Some(JsonFileStore::in_data_dir(&course.save_file)),
    };
    let store: Box<dyn BestTimeStore> = match file_store {
        Some(file_store) => {
            info!("Best time record at {}", file_store.path().display());
            Box::new(file_store)
        }
        None => {
            info!("Best time persistence disabled");
            Box::new(MemoryStore::new())
        }
    };

    let mut session = CourseSession::new(course, store);
    for frame in &frames {
        session.step(frame.dt, frame.position);
    }
    info!("Replay of {} frames complete", frames.len());

    print_summary(&session);
    Ok(())
}

enum SaveTarget {
    DataDir,
    Path(PathBuf),
    Disabled,
}

struct CliOptions {
    course_path: String,
    replay_path: String,
    save: SaveTarget,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        const USAGE: &str =
            "Usage: course-runtime <course.xml> <replay.txt> [--save-file PATH] [--no-save]";
        let mut args = env::args().skip(1);
        let (Some(course_path), Some(replay_path)) = (args.next(), args.next()) else {
            return Err(anyhow!(USAGE));
        };
        let mut save = SaveTarget::DataDir;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--save-file" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow!("--save-file expects a path"))?;
                    save = SaveTarget::Path(PathBuf::from(path));
                }
                "--no-save" => save = SaveTarget::Disabled,
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --save-file or --no-save"
                    ));
                }
            }
        }
        Ok(Self {
            course_path,
            replay_path,
            save,
        })
    }
}

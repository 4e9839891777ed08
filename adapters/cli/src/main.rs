#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Cat Chase experience.

mod config;

use anyhow::{Context, Result};
use cat_chase_core::{Event, Input};
use cat_chase_rendering::{outcome_message, Palette, Presentation, RenderingBackend, Scene};
use cat_chase_rendering_macroquad::MacroquadBackend;
use cat_chase_system_controller::{parse_script, Controller};
use cat_chase_system_scoreboard::Scoreboard;
use cat_chase_world::{self as world, query, World};
use clap::Parser;

use self::config::CliArgs;

/// Entry point for the Cat Chase command-line interface.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = run(CliArgs::parse()) {
        log::error!("fatal: {error:#}");
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let config = config::resolve(&args)?;
    let inputs = match &args.script {
        Some(script) => parse_script(script).context("failed to parse --script")?,
        None => Vec::new(),
    };

    let mut session = Session::new(World::new(config)?);
    println!("{}", query::welcome_banner(&session.world));
    for input in inputs {
        session.play(input);
    }

    if args.headless {
        session.print_summary();
        return Ok(());
    }

    let presentation = Presentation::new("Cat Chase", Palette::default(), session.scene());
    MacroquadBackend::new()
        .with_vsync(true)
        .run(presentation, move |_dt, frame_input, scene| {
            if let Some(input) = frame_input.to_input() {
                session.play(input);
                *scene = session.scene();
            }
        })
        .context("rendering backend failed")
}

/// World plus the systems that drive it for one player.
struct Session {
    world: World,
    controller: Controller,
    scoreboard: Scoreboard,
    events: Vec<Event>,
}

impl Session {
    fn new(world: World) -> Self {
        let mut session = Self {
            world,
            controller: Controller::new(),
            scoreboard: Scoreboard::new(),
            events: Vec::new(),
        };
        world::announce(&session.world, &mut session.events);
        session.scoreboard.handle(&session.events);
        session
    }

    fn play(&mut self, input: Input) {
        self.events.clear();
        self.controller
            .handle(&mut self.world, input, &mut self.events);
        self.scoreboard.handle(&self.events);
    }

    fn scene(&self) -> Scene {
        Scene::from_snapshots(
            query::grid(&self.world),
            query::cat_cell(&self.world),
            &query::mouse_view(&self.world),
            &query::house_view(&self.world),
            query::score(&self.world),
            query::outcome(&self.world),
        )
    }

    fn print_summary(&self) {
        let score = query::score(&self.world);
        println!(
            "Mice caught: {} | Mice safe: {} | Remaining: {}",
            score.caught,
            score.sheltered,
            score.remaining()
        );
        match query::outcome(&self.world) {
            Some(outcome) => println!("{}", outcome_message(outcome)),
            None => println!("Game in progress after {} moves.", query::move_count(&self.world)),
        }

        let tally = self.scoreboard.tally();
        println!(
            "Games: {} started, {} finished ({} won, {} lost, {} partial), {} moves total",
            tally.games_started,
            tally.games_finished(),
            tally.wins,
            tally.losses,
            tally.partials,
            tally.total_moves
        );
    }
}

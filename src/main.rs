//! Castle Bullet headless runner
//!
//! Plays a scripted session without a window and reports the outcome.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use castle_bullet::consts::DEFAULT_DT;
use castle_bullet::sim::{GameEvent, GamePhase, Snapshot, TickInput};
use castle_bullet::{FrameSink, Session, Tuning};
use clap::Parser;
use glam::Vec2;

#[derive(Parser, Debug)]
#[command(name = "castle-bullet")]
#[command(about = "Run a scripted Castle Bullet session headlessly")]
struct Cli {
    /// RNG seed for the run
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3_600)]
    ticks: u32,
    /// Frame delta in seconds
    #[arg(long, default_value_t = DEFAULT_DT)]
    dt: f32,
    /// JSON file with tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the final snapshot as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Logs gameplay events and remembers the latest frame
#[derive(Default)]
struct LogSink {
    last: Option<Snapshot>,
    kills: u32,
    bosses: u32,
}

impl FrameSink for LogSink {
    fn present(&mut self, snapshot: &Snapshot, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::EnemyKilled { .. } => self.kills += 1,
                GameEvent::BossKilled { .. } => self.bosses += 1,
                GameEvent::ScoreChanged { .. } | GameEvent::ProjectileFired { .. } => {}
                other => log::debug!("tick {}: {:?}", snapshot.tick, other),
            }
        }
        self.last = Some(snapshot.clone());
    }
}

/// Aim at the nearest threat, circle-strafe away from it, dash when crowded
fn scripted_input(snapshot: Option<&Snapshot>, frame: u32) -> TickInput {
    let Some(snap) = snapshot else {
        return TickInput::default();
    };
    let player = snap.player.pos;
    let threats = snap
        .enemies
        .iter()
        .map(|e| e.pos)
        .chain(snap.boss.as_ref().map(|b| b.pos));
    let nearest = threats.min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));

    let Some(target) = nearest else {
        return TickInput::default();
    };
    let to_target = (target - player).normalize_or_zero();
    let strafe = Vec2::new(-to_target.y, to_target.x);
    let flee = -to_target * 0.5;
    // Drift back toward the centre so the walls don't pin the player
    let recentre = -player * 0.3;

    TickInput {
        aim_stick: to_target,
        move_stick: (strafe + flee + recentre).clamp_length_max(1.0),
        trigger: 1.0,
        dash: target.distance(player) < 0.35 && frame % 30 == 0,
        ..Default::default()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading tuning file {}", path.display()))?;
            Tuning::from_json(&json).with_context(|| format!("loading tuning from {}", path.display()))?
        }
        None => Tuning::default(),
    };

    log::info!("Castle Bullet (headless) seed={} ticks={}", cli.seed, cli.ticks);
    let mut session = Session::new(cli.seed, tuning, LogSink::default()).context("invalid tuning")?;
    session.start();
    session.resume();

    for frame in 0..cli.ticks {
        let input = scripted_input(session.sink().last.as_ref(), frame);
        session.update(cli.dt, &input);
        if session.is_game_over() {
            log::info!("Run ended after {} frames", frame + 1);
            break;
        }
    }

    let sink = session.sink();
    let snapshot = session.state().snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        let outcome = match snapshot.phase {
            GamePhase::GameOver => "game over",
            _ => "survived",
        };
        println!("seed={}", cli.seed);
        println!("outcome={outcome}");
        println!("frames={}", snapshot.tick);
        println!("time={:.2}", snapshot.time);
        println!("score={}", snapshot.score);
        println!("level={}", snapshot.level);
        println!("kills={}", sink.kills);
        println!("bosses={}", sink.bosses);
        println!("area={}", snapshot.area_index);
    }
    Ok(())
}

//! Stdin-driven player input.
//!
//! Each move request is shown as a numbered menu of skills and their eligible
//! targets. The player answers with `<skill> <target>`, `pass` or `quit`.

use battle_core::EntityId;
use battle_runtime::{AbortHandle, MoveChoice, PlayerInputHandle, SelectionContext};
use tokio::sync::mpsc;

#[derive(Debug, PartialEq)]
pub enum Command {
    Move(MoveChoice),
    Pass,
    Quit,
}

struct SkillEntry {
    name: String,
    cost: f32,
    targets: Vec<(EntityId, String)>,
}

/// Menu built from one selection context.
pub struct Menu {
    header: String,
    rejection: Option<String>,
    skills: Vec<SkillEntry>,
}

impl Menu {
    pub fn new(ctx: &SelectionContext) -> Self {
        let header = match ctx.actor_entity() {
            Some(actor) => format!(
                "Round {}: {} ({:.1}/{:.1} hp, {:.1} resource)",
                ctx.round,
                actor,
                actor.health(),
                actor.stats.max_health,
                actor.resource()
            ),
            None => format!("Round {}: {}", ctx.round, ctx.actor),
        };

        let skills = ctx
            .available_skills()
            .into_iter()
            .map(|skill| SkillEntry {
                name: skill.name.clone(),
                cost: skill.stats.resource_cost,
                targets: ctx
                    .eligible_targets(&skill.name)
                    .into_iter()
                    .map(|target| {
                        let label = format!(
                            "{} ({:.1}/{:.1} hp)",
                            target,
                            target.health(),
                            target.stats.max_health
                        );
                        (target.id, label)
                    })
                    .collect(),
            })
            .collect();

        Self {
            header,
            rejection: ctx.rejection.as_ref().map(ToString::to_string),
            skills,
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("\n{}\n", self.header);
        if let Some(reason) = &self.rejection {
            out.push_str(&format!("  previous move refused: {reason}\n"));
        }
        for (i, skill) in self.skills.iter().enumerate() {
            out.push_str(&format!("  {}. {} (cost {:.1})\n", i + 1, skill.name, skill.cost));
            if skill.targets.is_empty() {
                out.push_str("       no eligible targets\n");
            }
            for (j, (_, label)) in skill.targets.iter().enumerate() {
                out.push_str(&format!("       {}) {}\n", j + 1, label));
            }
        }
        out.push_str("Enter <skill> <target>, 'pass' or 'quit': ");
        out
    }

    pub fn parse(&self, line: &str) -> Result<Command, String> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "pass" | "p" => return Ok(Command::Pass),
            "quit" | "q" => return Ok(Command::Quit),
            _ => {}
        }

        let mut parts = line.split_whitespace();
        let (Some(skill), Some(target), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err("expected two numbers: <skill> <target>".to_owned());
        };

        let skill = pick(&self.skills, skill, "skill")?;
        if skill.targets.is_empty() {
            return Err(format!("{} has no eligible targets", skill.name));
        }
        let (target, _) = pick(&skill.targets, target, "target")?;
        Ok(Command::Move(MoveChoice::new(skill.name.clone(), *target)))
    }
}

fn pick<'a, T>(items: &'a [T], raw: &str, what: &str) -> Result<&'a T, String> {
    raw.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| items.get(i))
        .ok_or_else(|| format!("no {what} numbered '{raw}'"))
}

/// Answers move requests from stdin until the runtime goes away.
///
/// End of input or `quit` aborts the battle.
pub async fn serve_player(input: PlayerInputHandle, abort: AbortHandle) {
    answer_requests(input, spawn_stdin_reader(), move || abort.abort()).await;
}

/// Answers each request from `lines`; `quit` runs once on end of input or `quit`.
async fn answer_requests(
    mut input: PlayerInputHandle,
    mut lines: mpsc::UnboundedReceiver<String>,
    quit: impl FnOnce(),
) {
    while let Some(mut request) = input.next_request().await {
        if request.is_cancelled() {
            continue;
        }
        let menu = Menu::new(request.context());
        print!("{}", menu.render());
        flush_stdout();

        loop {
            // A line typed after cancellation stays queued for the next request.
            let line = tokio::select! {
                biased;
                _ = request.cancelled() => {
                    println!();
                    break;
                }
                line = lines.recv() => line,
            };
            let Some(line) = line else {
                quit();
                return;
            };

            match menu.parse(&line) {
                Ok(Command::Move(choice)) => {
                    request.respond(choice);
                    break;
                }
                Ok(Command::Pass) => {
                    request.pass();
                    break;
                }
                Ok(Command::Quit) => {
                    quit();
                    return;
                }
                Err(message) => {
                    print!("{message}\n> ");
                    flush_stdout();
                }
            }
        }
    }
}

/// Reads stdin on a plain thread so a pending read never holds up runtime shutdown.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn flush_stdout() {
    use std::io::Write;
    let _ = std::io::stdout().flush();
}

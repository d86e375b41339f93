mod args;

use anyhow::{bail, Context};
use args::{Args, Start};
use life_engine::{catalog, Game, Listener};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn list_shapes(out: &mut impl Write) -> io::Result<()> {
    for pattern in catalog::global().all() {
        writeln!(
            out,
            "{:<24}{:>3} x {:<3}{:>5} cells",
            pattern.name(),
            pattern.width(),
            pattern.height(),
            pattern.cells().len()
        )?;
    }
    Ok(())
}

fn render(out: &mut impl Write, game: &Game) -> io::Result<()> {
    writeln!(
        out,
        "Generation {} ({} alive)",
        game.generations(),
        game.population_count()
    )?;
    writeln!(out, "{game}")?;
    writeln!(out)?;
    out.flush()
}

fn populate(game: &mut Game, start: &Start) -> anyhow::Result<()> {
    match start {
        Start::Pattern(name) => {
            let Some(pattern) = catalog::by_name(name) else {
                let known: Vec<_> = catalog::global().names().collect();
                bail!("unknown shape {name:?}, expected one of: {}", known.join(", "));
            };
            game.seed(pattern)
                .with_context(|| format!("cannot place shape {name:?}"))?;
        }
        Start::Random { density, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_os_rng(),
            };
            game.randomize_with(&mut rng, *density)
                .context("cannot fill the grid")?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    catalog::init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list {
        list_shapes(&mut out)?;
        return Ok(());
    }

    let mut game = Game::new(args.columns, args.rows)?;
    populate(&mut game, &args.start)?;

    // Render only when the game reports a change
    let dirty = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&dirty);
    let listener: Arc<dyn Listener> = Arc::new(move |_: &Game| flag.store(true, Ordering::Relaxed));
    game.subscribe(listener);

    let started = Instant::now();
    let interval = args.speed.interval();
    log::info!(
        "running {} generations on a {}x{} grid, {} per step",
        args.generations,
        args.columns,
        args.rows,
        args.speed
    );

    for step in 0..=args.generations {
        if step > 0 {
            thread::sleep(interval);
            game.next();
        }
        if dirty.swap(false, Ordering::Relaxed) {
            render(&mut out, &game).context("failed to write to stdout")?;
        }
        if game.population_count() == 0 && step > 0 {
            log::info!("population died out after {} generations", game.generations());
            break;
        }
    }

    log::info!(
        "finished at generation {} with {} live cells in {:.1?}",
        game.generations(),
        game.population_count(),
        started.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_board() {
        let mut game = Game::new(3, 2).unwrap();
        game.set_alive(1, 0).unwrap();
        let mut buffer = Vec::new();
        render(&mut buffer, &game).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Generation 0 (1 alive)\n.X.\n...\n\n"
        );
    }

    #[test]
    fn lists_every_shape() {
        let mut buffer = Vec::new();
        list_shapes(&mut buffer).unwrap();
        let listing = String::from_utf8(buffer).unwrap();
        assert_eq!(listing.lines().count(), catalog::global().len());
        assert!(listing.starts_with("Block"));
    }

    #[test]
    fn populate_reports_unknown_and_oversized_shapes() {
        let mut game = Game::new(5, 5).unwrap();
        let err = populate(&mut game, &Start::Pattern("Nope".into())).unwrap_err();
        assert!(err.to_string().contains("unknown shape"));

        let err = populate(&mut game, &Start::Pattern("Pulsar".into())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<life_engine::Error>(),
            Some(life_engine::Error::PatternTooLarge { .. })
        ));
    }

    #[test]
    fn seeded_random_fill_is_reproducible() {
        let start = Start::Random {
            density: 0.4,
            seed: Some(11),
        };
        let mut a = Game::new(12, 9).unwrap();
        let mut b = Game::new(12, 9).unwrap();
        populate(&mut a, &start).unwrap();
        populate(&mut b, &start).unwrap();
        assert_eq!(a.population(), b.population());
    }
}

use clap::Parser;
use ggez::{event, ContextBuilder};
use log::info;
use simplelog::{Config, LevelFilter, SimpleLogger};

use grid_snake::app::prefs::Prefs;
use grid_snake::app::App;
use grid_snake::error::{Error, ErrorConversion, Result};

/// Classic snake on a square grid
#[derive(Parser, Debug)]
#[command(name = "grid_snake", version)]
struct Args {
    /// Seconds between food spawns (default 5)
    food_spawn_interval: Option<String>,

    /// Most food items on the board at once (default 50)
    max_food: Option<String>,
}

fn main() -> Result {
    if let Err(e) = SimpleLogger::init(LevelFilter::Info, Config::default()) {
        eprintln!("logging disabled: {}", e);
    }

    let args = Args::parse();
    let prefs = Prefs::default().with_args(args.food_spawn_interval.as_deref(), args.max_food.as_deref());
    prefs.validate().map_err(Error::from).with_trace_step("main")?;
    info!(
        "food every {}s, at most {} at once",
        prefs.food_spawn_interval.as_secs_f64(),
        prefs.max_food_count,
    );

    let app = App::new(prefs);
    let (ctx, event_loop) = ContextBuilder::new("grid_snake", "grid_snake")
        .window_mode(app.wm())
        .window_setup(app.ws())
        .build()
        .map_err(Error::from)
        .with_trace_step("main")?;

    event::run(ctx, event_loop, app)
}

#[test]
fn test_args_are_two_optional_positionals() {
    let args = Args::try_parse_from(["grid_snake"]).unwrap();
    assert_eq!(args.food_spawn_interval, None);
    assert_eq!(args.max_food, None);

    let args = Args::try_parse_from(["grid_snake", "2.5", "oops"]).unwrap();
    let prefs = Prefs::default().with_args(args.food_spawn_interval.as_deref(), args.max_food.as_deref());
    assert_eq!(prefs.food_spawn_interval.as_millis(), 2500);
    assert_eq!(prefs.max_food_count, Prefs::DEFAULT_MAX_FOOD);

    assert!(Args::try_parse_from(["grid_snake", "1", "2", "3"]).is_err());
}

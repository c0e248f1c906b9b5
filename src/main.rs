use clap::Parser;
use springboard::{
    FrameRecorder, GestureEvent, Item, Point, Size, Springboard, config,
};

/// Headless springboard simulator: lays out a synthetic icon grid, runs a
/// drag-and-settle sequence and prints the resulting frames.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of synthetic items to place on the grid
    #[arg(short = 'n', long, default_value_t = 24)]
    items: usize,

    /// Viewport width in points
    #[arg(long, default_value_t = 320.0)]
    width: f64,

    /// Viewport height in points
    #[arg(long, default_value_t = 480.0)]
    height: f64,

    /// Write the default tuning file to the config directory and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config()?;
        println!("wrote default tuning to {}", path.display());
        return Ok(());
    }

    let tuning = config::load_or_default();
    let mut board = Springboard::new(tuning);
    let mut recorder = FrameRecorder::default();

    board.handle(GestureEvent::ViewportResized(Size::new(
        args.width,
        args.height,
    )));
    board.set_items(
        (0..args.items)
            .map(|i| Item::new(format!("app-{i}"), format!("App {i}"), format!("app-{i}.png")))
            .collect(),
    );
    board.layout_pass(&mut recorder);

    println!(
        "{} items, {} per line, zoom {:.3} (minimum {:.3}), content {:.0}x{:.0}",
        args.items,
        board.grid().items_per_line,
        board.zoom_scale(),
        board.minimum_zoom_scale(),
        recorder.viewport.content_size.width,
        recorder.viewport.content_size.height,
    );

    // Zoom out to the full grid, then fling off the left edge and let the
    // engine pick the settle target.
    board.show_all(false);
    board.layout_pass(&mut recorder);
    log::info!("show-all zoom {:.3}", board.zoom_scale());

    board.handle(GestureEvent::DragStarted);
    let proposed = Point::new(board.content_offset().x - 600.0, board.content_offset().y);
    let corrected = board
        .handle(GestureEvent::DragWillEnd {
            proposed_offset: proposed,
            velocity: Point::new(-900.0, 0.0),
        })
        .unwrap_or(proposed);
    board.handle(GestureEvent::Scrolled(corrected));
    board.handle(GestureEvent::DragEnded {
        will_decelerate: true,
    });
    board.handle(GestureEvent::DecelerationEnded);
    board.layout_pass(&mut recorder);

    println!(
        "fling corrected to ({:.1}, {:.1}), settled at ({:.1}, {:.1}), phase {}, focused {:?}",
        corrected.x,
        corrected.y,
        board.content_offset().x,
        board.content_offset().y,
        board.phase(),
        board.focused_item().map(|id| id.to_string()),
    );

    let mut ids: Vec<_> = recorder.frames.keys().cloned().collect();
    ids.sort_by_key(|id| board.items().index_of(id));
    for id in ids {
        let frame = &recorder.frames[&id];
        println!(
            "{:>8}  center ({:7.1}, {:7.1})  scale {:.3}  offset ({:+6.1}, {:+6.1})  label {}",
            id.to_string(),
            frame.center.x,
            frame.center.y,
            frame.scale,
            frame.transform.tx,
            frame.transform.ty,
            if frame.label_visible { "shown" } else { "hidden" },
        );
    }

    Ok(())
}

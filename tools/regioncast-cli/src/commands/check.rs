//! Check screen capture availability.

use regioncast_capture_engine::list_monitors;

pub fn run() -> anyhow::Result<()> {
    println!("Regioncast System Check");
    println!("{}", "=".repeat(50));

    let monitors = match list_monitors() {
        Ok(monitors) => monitors,
        Err(e) => {
            println!("[FAIL] Screen capture unavailable: {e}");
            return Err(e.into());
        }
    };

    if monitors.is_empty() {
        println!("[WARN] No monitors detected. Use --synthetic WxH to run headless.");
        return Ok(());
    }

    println!("[OK] Monitors detected: {}", monitors.len());
    for m in &monitors {
        println!(
            "     #{} {} {}x{} {}",
            m.index,
            m.name,
            m.width,
            m.height,
            if m.primary { "(primary)" } else { "" }
        );
    }
    Ok(())
}

use ratbagd::{Manager, Result};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let manager = Manager::new().await?;
    let devices = manager.devices().await?;

    if devices.is_empty() {
        println!("No devices found");
        return Ok(());
    }

    for device in devices {
        println!(
            "{}: {}",
            device.id().unwrap_or_default(),
            device.name().unwrap_or_default()
        );

        let active = device.active_profile().await?;
        for profile in device.profiles().await? {
            let marker = if active.as_ref() == Some(&profile) { "*" } else { " " };
            println!("  {marker} profile {}", profile.index().unwrap_or_default());

            for resolution in profile.resolutions().await? {
                if let Some((x, y)) = resolution.resolution() {
                    println!(
                        "      {x}x{y} dpi @ {} Hz",
                        resolution.report_rate().unwrap_or_default()
                    );
                }
            }

            for button in profile.buttons().await? {
                println!(
                    "      button {}: {:?}",
                    button.index().unwrap_or_default(),
                    button.action()
                );
            }

            for led in profile.leds().await? {
                if let (Some(mode), Some(color)) = (led.mode(), led.color()) {
                    println!("      led {}: {mode} {color}", led.index().unwrap_or_default());
                }
            }
        }
    }

    Ok(())
}

use ratbagd::{Manager, Result, Rgb};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let color = match std::env::args().nth(1) {
        Some(hex) => parse_hex(&hex).unwrap_or_else(|| {
            eprintln!("Invalid color {hex}, expected rrggbb");
            std::process::exit(1);
        }),
        None => Rgb::new(255, 0, 0),
    };

    let manager = Manager::new().await?;
    for device in manager.devices().await? {
        let Some(profile) = device.active_profile().await? else {
            continue;
        };

        for led in profile.leds().await? {
            match led.set_color(color).await {
                Some(code) if code.is_success() => println!("{}: {color}", led.path()),
                Some(code) => eprintln!("{}: {code}", led.path()),
                None => eprintln!("{}: no reply from ratbagd", led.path()),
            }
        }

        device.commit().await;
    }

    Ok(())
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

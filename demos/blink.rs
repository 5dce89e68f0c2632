// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Finds a kit, lights its LED, plays a tune and polls its sensors.
//!
//! ```text
//! RUST_LOG=wearable_kit=debug cargo run --example blink --features rfcomm -- wV3_0E0039AF
//! ```

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use wearable_kit::config::RfcommConfig;
use wearable_kit::subscription::Subscribable;
use wearable_kit::transport::{RfcommTransport, notification_channel};
use wearable_kit::types::Sensor;
use wearable_kit::Wearable;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() -> wearable_kit::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wV3".to_string());

    let (notifier, notifications) = notification_channel();
    let transport = RfcommTransport::new(RfcommConfig::default(), notifier).await?;
    let kit = Wearable::builder(transport, notifications)
        .with_name(&name)
        .build()?;

    kit.on_disconnected(|| println!("Disconnected from the wearable!"));
    kit.on_error(|message| eprintln!("error: {message}"));
    kit.on_sensor_data(|reading| match reading.sensor {
        Sensor::Temperature => println!("temperature is {}", reading.raw.trim()),
        Sensor::Accelerometer(axis) => println!("accelerometer {axis}: {}", reading.raw.trim()),
        Sensor::Luminosity => println!("luminosity is {}", reading.raw.trim()),
    });

    kit.find_device().await?;

    tokio::select! {
        () = kit.run() => {}
        result = drive(&kit) => result?,
        _ = tokio::signal::ctrl_c() => {}
    }

    kit.disconnect().await;
    let readings = kit.readings();
    println!(
        "last readings: temperature {:?}, accelerometer {:?}",
        readings.temperature, readings.accelerometer
    );
    Ok(())
}

/// Waits for the connection, then plays with the kit until it goes away.
async fn drive(kit: &Wearable<RfcommTransport>) -> wearable_kit::Result<()> {
    let mut phase = kit.watch_phase();
    let connected = match phase.wait_for(|phase| phase.is_settled()).await {
        Ok(phase) => phase.is_connected(),
        Err(_) => false,
    };
    if !connected {
        return Ok(());
    }

    println!("Connected to the kit");
    kit.led_on(Some("blue"), None).await?;
    kit.play_music(Some("mario")).await?;

    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    while kit.is_connected() {
        ticker.tick().await;
        kit.read_accelerometer().await?;
        kit.get_temperature().await?;
    }
    Ok(())
}

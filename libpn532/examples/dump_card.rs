// Dump an NTAG-style card through a PN532 on a serial port.
//
// cargo run -p libpn532 --example dump_card -- /dev/ttyUSB0

use std::time::Duration;

use libpn532::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let port = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: dump_card <serial-port>"))?;

    let config = SessionConfig::default()
        .with_serial_port(port.clone())
        .with_scan_timeout(Duration::from_secs(5));
    let session = CardSession::new(config);

    let mut events = session.subscribe();
    tokio::spawn(async move {
        while let Ok(ev) = events.recv().await {
            println!("{ev}");
        }
    });

    println!("Opening reader on {port}...");
    session.connect().await?;

    println!("Hold a card on the reader");
    let Some(card) = session.scan().await? else {
        println!("No card detected");
        session.disconnect().await;
        return Ok(());
    };
    println!("  UID  = {}", card.uid().to_hex());
    println!("  ATQA = {:04X}  SAK = {:02X}", card.atqa().as_u16(), card.sak());
    println!("  Type = {}", card.inferred_type());

    match session.read_all_pages().await {
        Ok(pages) => print_dump(&pages),
        Err(Error::PartialRead { pages, source }) => {
            println!("Read stopped early: {source}");
            print_dump(&pages);
        }
        Err(e) => return Err(e.into()),
    }

    session.disconnect().await;
    Ok(())
}

fn print_dump(pages: &PageBuffer) {
    println!(
        "{} bytes from page {}{}",
        pages.len(),
        pages.start_page(),
        if pages.is_terminated() { "" } else { " (no end marker)" }
    );
    for (i, row) in pages.to_bytes().chunks(4).enumerate() {
        println!("  {:3}: {}", pages.start_page() as usize + i, bytes_to_hex_spaced(row));
    }
}

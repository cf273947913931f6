//! Authorization round-trip example: declare a dialect, build a 1100
//! request, serialize it, and parse the bytes back.
use chrono::Utc;
use iron8583::prelude::*;
use std::sync::Arc;

fn declare_dialect() -> Arc<Dialect> {
    let mut dialect = Dialect::new("ISO 8583:1993");
    dialect.declare_mti_codec(&codecs::n(4), FieldOptions::new());
    dialect
        .declare_mti(1100u16, "Authorization Request")
        .expect("fresh dialect");
    dialect
        .declare_mti(1110u16, "Authorization Response")
        .expect("fresh dialect");
    dialect.declare_field(
        2,
        "Primary Account Number",
        &codecs::llvar_n(19),
        FieldOptions::new(),
    );
    dialect.declare_field(3, "Processing Code", &codecs::n(6), FieldOptions::new());
    dialect.declare_field(
        4,
        "Amount, Transaction",
        &codecs::n(12),
        FieldOptions::new(),
    );
    dialect.declare_field(
        7,
        "Transmission Date and Time",
        &codecs::mmddhhmmss(),
        FieldOptions::new(),
    );
    dialect.declare_field(
        49,
        "Currency Code, Transaction",
        &codecs::n(3),
        FieldOptions::new(),
    );
    dialect.declare_alias("pan", 2).expect("field 2 declared");
    dialect.declare_alias("amount", 4).expect("field 4 declared");
    Arc::new(dialect)
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let dialect = declare_dialect();

    let mut request = Message::with_mti(Arc::clone(&dialect), 1100u16)?;
    request.set("pan", "4242424242424242")?;
    request.set(3, "003000")?;
    request.set("amount", "000000012500")?;
    request.set(7, DateTimeKind::MmDdHhMmSs.format(&Utc::now()))?;
    request.set(49, "978")?;

    let wire = request.to_bytes()?;
    println!("{}", request.describe());
    println!("wire ({} bytes):", wire.len());
    for chunk in wire.chunks(16) {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02X}")).collect();
        println!("  {}", hex.join(" "));
    }

    let parsed = Message::parse(&dialect, &wire)?;
    println!("\nparsed back:");
    println!("{}", parsed.describe());

    assert_eq!(parsed.get("pan")?, request.get("pan")?);
    assert_eq!(parsed.mti(), request.mti());
    Ok(())
}

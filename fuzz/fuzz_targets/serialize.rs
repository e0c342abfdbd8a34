#![no_main]

use std::sync::Arc;

use fixedtext::prelude::*;
use libfuzzer_sys::fuzz_target;

struct Line {
    number: i64,
    text: String,
}

impl FixedText for Line {
    fn declare(layout: &mut LayoutDecl<Self>) {
        layout.numeric("number", |l| l.number.into()).width(12);
        layout.text("text", |l| (&l.text).into()).width(24);
    }
}

fuzz_target!(|data: &[u8]| {
    let registry = Arc::new(LayoutRegistry::new());
    registry.register::<Line>();
    let serializer = Serializer::new(registry, Arc::new(Legacy::shift_jis()));

    let number = data
        .iter()
        .take(8)
        .fold(0i64, |acc, &b| acc.wrapping_shl(8) | i64::from(b));
    let line = Line {
        number,
        text: String::from_utf8_lossy(data).into_owned(),
    };

    match serializer.serialize(&line) {
        Ok(record) => assert_eq!(record.len(), 36),
        Err(Error::FieldOverflow { .. } | Error::UnmappableText { .. }) => {}
        Err(other) => panic!("unexpected error: {other}"),
    }
});

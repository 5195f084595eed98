//! Log lines emitted on behalf of a caller carry its context label.

use glossarc_archive::{CompressionTag, NamedContext, compress};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs;
use std::sync::Mutex;

struct Capture {
    lines: Mutex<Vec<String>>,
}

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("glossarc_archive") {
            self.lines.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    lines: Mutex::new(Vec::new()),
};

#[test]
fn test_messages_carry_context_label() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("dict.txt");
    fs::write(&file, b"apple\tfruit\n").unwrap();
    let mydict = dir.path().join("mydict");
    fs::create_dir_all(mydict.join("sub")).unwrap();
    fs::write(mydict.join("a.txt"), b"alpha").unwrap();
    fs::write(mydict.join("sub").join("b.txt"), b"beta").unwrap();

    let ctx = NamedContext::new("fruits");
    compress(&ctx, &file, CompressionTag::Gz).unwrap();
    compress(&ctx, &mydict, CompressionTag::Zip).unwrap();
    compress(&ctx, dir.path().join("ghost.txt"), CompressionTag::Zip).unwrap();

    let lines = CAPTURE.lines.lock().unwrap();
    assert!(lines.iter().any(|l| l.contains("Adding sub/b.txt")));
    assert!(lines.iter().any(|l| l.contains("Removing archived directory")));
    assert!(lines.iter().any(|l| l.contains("Failed to compress file")));
    for line in lines.iter() {
        assert!(line.starts_with("[fruits] "), "unlabelled: {line}");
    }
}

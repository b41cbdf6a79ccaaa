#![no_main]

use libfuzzer_sys::fuzz_target;
use depcheck_sonar_converter::MavenCoordinate;

fuzz_target!(|data: &[u8]| {
    if let Ok(reference) = std::str::from_utf8(data) {
        if let Ok(coord) = MavenCoordinate::parse_reference(reference) {
            assert!(!coord.group_id.is_empty());
            assert!(!coord.artifact_id.is_empty());
            assert!(!coord.version.is_empty());
            assert!(!coord.group_id.contains('/'));
        }
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use depcheck_sonar_converter::ReportConverter;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let converter = ReportConverter::default();
        if let Ok(report) = converter.convert_str(content) {
            // 규칙은 항상 하나, 직렬화는 실패하지 않아야 한다
            assert_eq!(report.rules.len(), 1);
            let json = report.to_json().expect("sonar report must serialize");
            let _: serde_json::Value =
                serde_json::from_str(&json).expect("sonar report must be valid JSON");
        }
    }
});

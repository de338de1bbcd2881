use crate::error::EpoError;
use crate::protocol::InvocationResult;
use colored::*;
use serde_json::Value;

pub const NO_RESULTS: &str = "No results found";

/// 레코드 한 건을 한 줄로 렌더링
pub fn format_record(record: &Value) -> String {
    match record {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 쿼리 결과 출력. 레코드는 stdout, 요약은 stderr
pub fn print_records(records: &[Value]) {
    if records.is_empty() {
        println!("{}", NO_RESULTS);
        return;
    }

    for record in records {
        println!("{}", format_record(record));
    }
    eprintln!("{} {} record(s)", "[OK]".green(), records.len());
}

/// action 결과 출력
pub fn print_result(result: &InvocationResult) {
    if result.is_empty() {
        println!("{}", NO_RESULTS);
    } else {
        println!("{}", result);
    }
}

/// 에러 출력. 서버 에러라면 코드를 함께 보여줌
pub fn print_error(error: &EpoError) {
    match error.protocol_code() {
        Some(code) => eprintln!("{} Error {}: {}", "[X]".red().bold(), code, error),
        None => eprintln!("{} {}", "[X]".red().bold(), error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_record() {
        assert_eq!(format_record(&json!({"a": 1})), "{\"a\":1}");
        assert_eq!(format_record(&json!("plain")), "plain");
        assert_eq!(format_record(&json!(3)), "3");
    }
}

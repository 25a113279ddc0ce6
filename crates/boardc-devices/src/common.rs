//! Pieces shared by every device parser.

use boardc_core::InitMap;

/// The `name` and `type` members every device structure starts with.
/// `name` is emitted as a C string literal.
pub(crate) fn device_header(name: &str, kind: &str) -> InitMap {
    InitMap::new()
        .with("name", format!("\"{name}\""))
        .with("type", kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardc_core::InitValue;

    #[test]
    fn quotes_name_only() {
        let h = device_header("btn1", "gpio_ctrl");
        assert_eq!(h.get("name"), Some(&InitValue::from("\"btn1\"")));
        assert_eq!(h.get("type"), Some(&InitValue::from("gpio_ctrl")));
    }
}

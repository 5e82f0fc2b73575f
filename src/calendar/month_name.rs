use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "Gener", "Febrer", "Març", "Abril", "Maig", "Juny",
    "Juliol", "Agost", "Setembre", "Octubre", "Novembre", "Desembre",
];

pub const WEEKDAY_NAMES: [&str; 7] = [
    "dilluns", "dimarts", "dimecres", "dijous", "divendres", "dissabte", "diumenge",
];

/// Grid header, Monday first.
pub const WEEKDAY_SHORT: [&str; 7] = ["Dl", "Dt", "Dc", "Dj", "Dv", "Ds", "Dg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthName {
    pub name: &'static str,
    pub year: i32,
}

pub fn get_month_name(year: i32, month: u32) -> MonthName {
    MonthName {
        name: MONTH_NAMES[(month % 12) as usize],
        year,
    }
}

/// Long label for the selected day, e.g. "dimarts, 1 d'abril".
pub fn long_date_label(date: NaiveDate) -> String {
    let weekday = WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize];
    let month = MONTH_NAMES[date.month0() as usize].to_lowercase();
    let preposition = if month.starts_with(['a', 'e', 'i', 'o', 'u']) { "d'" } else { "de " };

    format!("{}, {} {}{}", weekday, date.day(), preposition, month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_name_by_zero_based_month() {
        assert_eq!(get_month_name(2024, 0), MonthName { name: "Gener", year: 2024 });
        assert_eq!(get_month_name(2024, 2).name, "Març");
        assert_eq!(get_month_name(1999, 11).name, "Desembre");
    }

    #[test]
    fn long_label_uses_de_before_consonant() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(long_date_label(date), "dilluns, 5 de febrer");
    }

    #[test]
    fn long_label_elides_before_vowel() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert_eq!(long_date_label(date), "dimarts, 1 d'abril");

        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(long_date_label(date), "dilluns, 19 d'octubre");
    }
}

//! Campsite reservation form
//!
//! Purely transient: nothing here is persisted. Submitting echoes the values
//! to the log and resets every field.

use crate::config::Platform;
use crate::constants::{MAX_CAMPERS, MIN_CAMPERS};
use crate::logger;
use crate::utils::FormError;
use chrono::{DateTime, Datelike, Local};

/// Values captured when the user taps "Search Availability"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    pub campers: u8,
    pub hike_in: bool,
    pub date: DateTime<Local>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservationForm {
    campers: u8,
    hike_in: bool,
    date: DateTime<Local>,
    show_calendar: bool,
    platform: Platform,
}

impl ReservationForm {
    pub fn new(platform: Platform, now: DateTime<Local>) -> Self {
        Self {
            campers: MIN_CAMPERS,
            hike_in: false,
            date: now,
            show_calendar: false,
            platform,
        }
    }

    pub fn campers(&self) -> u8 {
        self.campers
    }

    pub fn hike_in(&self) -> bool {
        self.hike_in
    }

    pub fn date(&self) -> DateTime<Local> {
        self.date
    }

    pub fn show_calendar(&self) -> bool {
        self.show_calendar
    }

    pub fn set_campers(&mut self, campers: u8) -> Result<(), FormError> {
        if !(MIN_CAMPERS..=MAX_CAMPERS).contains(&campers) {
            return Err(FormError::CampersOutOfRange {
                value: campers,
                min: MIN_CAMPERS,
                max: MAX_CAMPERS,
            });
        }
        self.campers = campers;
        Ok(())
    }

    pub fn set_hike_in(&mut self, hike_in: bool) {
        self.hike_in = hike_in;
    }

    pub fn toggle_calendar(&mut self) {
        self.show_calendar = !self.show_calendar;
    }

    /// Date picker callback. `None` means the picker was dismissed.
    ///
    /// Android closes its modal picker after every change; iOS renders it
    /// inline, so it stays open.
    pub fn on_date_change(&mut self, selected: Option<DateTime<Local>>) {
        self.show_calendar = self.platform == Platform::Ios;
        if let Some(date) = selected {
            self.date = date;
        }
    }

    /// Button label, US style (`M/D/YYYY`).
    pub fn display_date(&self) -> String {
        format!(
            "{}/{}/{}",
            self.date.month(),
            self.date.day(),
            self.date.year()
        )
    }

    /// Capture the current values and reset the form to its initial state.
    pub fn submit(&mut self, now: DateTime<Local>) -> Reservation {
        let reservation = Reservation {
            campers: self.campers,
            hike_in: self.hike_in,
            date: self.date,
        };

        logger::log_info(&format!(
            "reservation: campers={} hike_in={} date={}",
            reservation.campers,
            reservation.hike_in,
            reservation.date.to_rfc3339()
        ));

        *self = ReservationForm::new(self.platform, now);
        reservation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn starts_with_defaults() {
        let now = at(2026, 7, 4);
        let form = ReservationForm::new(Platform::Android, now);
        assert_eq!(form.campers(), 1);
        assert!(!form.hike_in());
        assert_eq!(form.date(), now);
        assert!(!form.show_calendar());
    }

    #[test]
    fn campers_limited_to_picker_range() {
        let mut form = ReservationForm::new(Platform::Android, at(2026, 7, 4));
        assert!(form.set_campers(6).is_ok());
        assert_eq!(form.campers(), 6);
        assert!(form.set_campers(0).is_err());
        assert!(form.set_campers(7).is_err());
        assert_eq!(form.campers(), 6);
    }

    #[test]
    fn date_change_closes_picker_on_android() {
        let mut form = ReservationForm::new(Platform::Android, at(2026, 7, 4));
        form.toggle_calendar();
        assert!(form.show_calendar());

        form.on_date_change(Some(at(2026, 8, 1)));
        assert!(!form.show_calendar());
        assert_eq!(form.date(), at(2026, 8, 1));
    }

    #[test]
    fn date_change_keeps_picker_on_ios() {
        let mut form = ReservationForm::new(Platform::Ios, at(2026, 7, 4));
        form.toggle_calendar();
        form.on_date_change(Some(at(2026, 8, 1)));
        assert!(form.show_calendar());
    }

    #[test]
    fn dismissed_picker_keeps_current_date() {
        let mut form = ReservationForm::new(Platform::Android, at(2026, 7, 4));
        form.toggle_calendar();
        form.on_date_change(None);
        assert_eq!(form.date(), at(2026, 7, 4));
        assert!(!form.show_calendar());
    }

    #[test]
    fn display_date_is_us_format() {
        let form = ReservationForm::new(Platform::Android, at(2026, 3, 9));
        assert_eq!(form.display_date(), "3/9/2026");
    }

    #[test]
    fn submit_returns_values_and_resets() {
        let mut form = ReservationForm::new(Platform::Ios, at(2026, 7, 4));
        form.set_campers(4).unwrap();
        form.set_hike_in(true);
        form.toggle_calendar();
        form.on_date_change(Some(at(2026, 9, 12)));

        let later = at(2026, 7, 5);
        let reservation = form.submit(later);

        assert_eq!(
            reservation,
            Reservation {
                campers: 4,
                hike_in: true,
                date: at(2026, 9, 12),
            }
        );
        assert_eq!(form, ReservationForm::new(Platform::Ios, later));
    }
}

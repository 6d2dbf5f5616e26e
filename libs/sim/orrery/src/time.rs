// This file is part of Nitrogen.
//
// Nitrogen is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Nitrogen is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Nitrogen.  If not, see <http://www.gnu.org/licenses/>.
use chrono::{prelude::*, Duration};
use once_cell::sync::Lazy;

/// Terrestrial Time minus International Atomic Time, a fixed offset fixed by
/// convention at the 1958 epoch.
pub const TT_MINUS_TAI_SECONDS: f64 = 32.184;

/// Modified Julian Date epoch: 1858-11-17 00:00 UTC.
fn mjd_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1858, 11, 17, 0, 0, 0).earliest().unwrap()
}

pub fn utc_datetime_to_mjd(dt: DateTime<Utc>) -> f64 {
    let delta = dt - mjd_epoch();
    delta.num_milliseconds() as f64 / 86_400_000.0
}

pub fn mjd_to_utc_datetime(mjd: f64) -> DateTime<Utc> {
    mjd_epoch() + Duration::milliseconds((mjd * 86_400_000.0).round() as i64)
}

fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .earliest()
        .unwrap()
}

/// Dates (UTC) of each leap second insertion, most recent first.
static LEAP_SECONDS: Lazy<Vec<DateTime<Utc>>> = Lazy::new(|| {
    let mut v = vec![
        utc(1972, 6, 30, 23, 59, 59),
        utc(1972, 12, 31, 23, 59, 59),
        utc(1973, 12, 31, 23, 59, 59),
        utc(1974, 12, 31, 23, 59, 59),
        utc(1975, 12, 31, 23, 59, 59),
        utc(1976, 12, 31, 23, 59, 59),
        utc(1977, 12, 31, 23, 59, 59),
        utc(1978, 12, 31, 23, 59, 59),
        utc(1979, 12, 31, 23, 59, 59),
        utc(1981, 6, 30, 23, 59, 59),
        utc(1982, 6, 30, 23, 59, 59),
        utc(1983, 6, 30, 23, 59, 59),
        utc(1985, 6, 30, 23, 59, 59),
        utc(1987, 12, 31, 23, 59, 59),
        utc(1989, 12, 31, 23, 59, 59),
        utc(1990, 12, 31, 23, 59, 59),
        utc(1992, 6, 30, 23, 59, 59),
        utc(1993, 6, 30, 23, 59, 59),
        utc(1994, 6, 30, 23, 59, 59),
        utc(1995, 12, 31, 23, 59, 59),
        utc(1997, 6, 30, 23, 59, 59),
        utc(1998, 12, 31, 23, 59, 59),
        utc(2005, 12, 31, 23, 59, 59),
        utc(2008, 12, 31, 23, 59, 59),
        utc(2012, 6, 30, 23, 59, 59),
        utc(2015, 6, 30, 23, 59, 59),
        utc(2016, 12, 31, 23, 59, 59),
    ];
    v.reverse();
    v
});

pub fn num_leap_seconds_at(utc_time: DateTime<Utc>) -> i64 {
    for (offset, date) in LEAP_SECONDS.iter().enumerate() {
        if utc_time > *date {
            return (LEAP_SECONDS.len() - offset) as i64;
        }
    }
    0
}

/// TT MJD -> UTC MJD. TT = UTC + 32.184s + leap_seconds(utc); since the leap
/// second count only ever changes on a handful of fixed dates a single
/// fixed-point correction is enough in practice.
pub fn tt_mjd_to_utc_mjd(tt_mjd: f64) -> f64 {
    let guess_utc = tt_mjd - TT_MINUS_TAI_SECONDS / 86_400.0;
    let leap = num_leap_seconds_at(mjd_to_utc_datetime(guess_utc));
    tt_mjd - (TT_MINUS_TAI_SECONDS + leap as f64) / 86_400.0
}

/// UTC MJD -> TT MJD.
pub fn utc_mjd_to_tt_mjd(utc_mjd: f64) -> f64 {
    let leap = num_leap_seconds_at(mjd_to_utc_datetime(utc_mjd));
    utc_mjd + (TT_MINUS_TAI_SECONDS + leap as f64) / 86_400.0
}

/// UT1 MJD from UTC MJD and the (looked up or estimated) DUT1 offset in
/// seconds. The engine does not maintain a live DUT1 bulletin; callers may
/// supply a nonzero `dut1_seconds` if they have one, otherwise 0 is a
/// sub-second approximation good enough for rendering.
pub fn utc_mjd_to_ut1_mjd(utc_mjd: f64, dut1_seconds: f64) -> f64 {
    utc_mjd + dut1_seconds / 86_400.0
}

/// MJD of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_TT_MJD: f64 = 51544.5;

/// Standard (IAU) Julian centuries of TT elapsed since J2000.0.
pub fn julian_centuries_tt(tt_mjd: f64) -> f64 {
    (tt_mjd - J2000_TT_MJD) / 36_525.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_seconds_known_dates() {
        assert_eq!(num_leap_seconds_at(utc(2020, 1, 1, 12, 0, 0)), 27);
        assert_eq!(num_leap_seconds_at(utc(2010, 1, 1, 12, 0, 0)), 24);
        assert_eq!(num_leap_seconds_at(utc(1969, 1, 1, 12, 0, 0)), 0);
    }

    #[test]
    fn tt_utc_round_trip() {
        // 1800 <= year <= 2100, identity within 1 microsecond.
        for year in [1800, 1900, 1972, 2000, 2020, 2100] {
            let utc_mjd = utc_datetime_to_mjd(utc(year, 6, 15, 0, 0, 0));
            let tt_mjd = utc_mjd_to_tt_mjd(utc_mjd);
            let round_tripped = tt_mjd_to_utc_mjd(tt_mjd);
            let err_days = (round_tripped - utc_mjd).abs();
            assert!(err_days * 86_400.0 < 1e-6, "year {year} err {err_days}");
        }
    }

    #[test]
    fn mjd_datetime_round_trip() {
        let dt = utc(2020, 4, 24, 4, 18, 58);
        let mjd = utc_datetime_to_mjd(dt);
        let back = mjd_to_utc_datetime(mjd);
        assert_eq!(dt.timestamp(), back.timestamp());
    }
}

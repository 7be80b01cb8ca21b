use crate::error::DownloaderError;
use crate::types::{DownloadOptions, ReportRequest};
use chrono::{Datelike, Duration, NaiveDate};
use log::debug;

/// Computes the ordered list of report periods to request, most recent
/// first. Pure: `today` is passed in rather than read from the clock.
pub fn plan_requests(
    options: &DownloadOptions,
    today: NaiveDate,
) -> Result<Vec<ReportRequest>, DownloaderError> {
    let period = options.period();

    if let Some(raw) = &options.explicit_date {
        let date = NaiveDate::parse_from_str(raw, "%m/%d/%Y")
            .map_err(|_| DownloaderError::InvalidDateFormat(raw.clone()))?;
        return Ok(vec![ReportRequest { date, period }]);
    }

    // Weekly reports are filed under their period's Sunday, so anchor to
    // the most recent Sunday on or before today.
    let days_since_sunday = (today.weekday().num_days_from_monday() as i64 + 1) % 7;
    let last_sunday = today - Duration::days(days_since_sunday);

    let mut requests = Vec::with_capacity(options.count as usize);
    for i in 0..options.count as i64 {
        let date = if options.weekly {
            last_sunday - Duration::days(i * 7)
        } else {
            today - Duration::days(i + 1)
        };
        requests.push(ReportRequest { date, period });
    }

    debug!("planned report dates: {:?}", requests.iter().map(|r| r.date).collect::<Vec<_>>());
    Ok(requests)
}

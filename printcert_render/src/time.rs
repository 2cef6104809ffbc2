// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, SecondsFormat, Utc};

use super::{html_escape::HtmlEscapable, Render};

pub fn text_time(time: &DateTime<Utc>) -> String {
    time.format("%a %b %d %H:%M:%S UTC %Y").to_string()
}

impl Render for DateTime<Utc> {
    fn render(&self) -> String {
        format!(
            "<time datetime='{}'>{}</time>",
            self.to_rfc3339_opts(SecondsFormat::Millis, true),
            text_time(self).html_escape()
        )
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn simple_date() {
        let date = Utc.ymd(2022, 1, 1).and_hms(0, 0, 0);
        assert_eq!(text_time(&date), "Sat Jan 01 00:00:00 UTC 2022");
        assert_eq!(
            date.render(),
            "<time datetime='2022-01-01T00:00:00.000Z'>Sat Jan 01 00:00:00 UTC 2022</time>"
        );
    }
}

use crate::descriptor::SeriesDescriptor;
use crate::position::TimePosition;

impl SeriesDescriptor {
    /// Expand `%` tokens in a legend template from descriptor fields.
    ///
    /// | token | value |
    /// |-------|-------|
    /// | `%%`  | literal `%` |
    /// | `%A`  | alias |
    /// | `%b`  | interval base |
    /// | `%D`  | description |
    /// | `%F`  | full identifier |
    /// | `%I`  | interval |
    /// | `%i`  | input name |
    /// | `%L`  | location |
    /// | `%m`  | interval multiplier |
    /// | `%p`  | period of record |
    /// | `%S`  | source |
    /// | `%T`  | data type |
    /// | `%U`  | units |
    /// | `%Z`  | scenario |
    /// | `%z`  | sequence identifier |
    ///
    /// Unknown tokens and a trailing `%` are copied through unchanged.
    pub fn format_legend(&self, template: &str) -> String {
        let mut legend = String::with_capacity(template.len() * 2);
        let mut chars = template.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                legend.push(c);
                continue;
            }
            let Some(token) = chars.next() else {
                legend.push('%');
                break;
            };
            let ident = self.ident();
            match token {
                '%' => legend.push('%'),
                'A' => legend.push_str(&ident.alias),
                'b' => legend.push_str(self.interval_base().name()),
                'D' => legend.push_str(self.description()),
                'F' => legend.push_str(&ident.to_string()),
                'I' => legend.push_str(&self.interval().to_string()),
                'i' => legend.push_str(&ident.input_name),
                'L' => legend.push_str(&ident.location),
                'm' => legend.push_str(&self.interval_mult().to_string()),
                'p' => legend.push_str(&self.period_text()),
                'S' => legend.push_str(&ident.source),
                'T' => legend.push_str(&ident.data_type),
                'U' => legend.push_str(self.units()),
                'Z' => legend.push_str(&ident.scenario),
                'z' => legend.push_str(self.sequence_id()),
                other => {
                    legend.push('%');
                    legend.push(other);
                }
            }
        }
        legend
    }

    fn period_text(&self) -> String {
        let bound = |date: Option<TimePosition>| date.map(|d| d.to_string()).unwrap_or_default();
        format!("{} - {}", bound(self.date1()), bound(self.date2()))
    }
}

#[cfg(test)]
mod tests {
    use crate::ident::TsIdent;
    use crate::position::TimePosition;
    use crate::store::{MonthTs, TimeSeries};

    #[test]
    fn test_format_legend() {
        let mut series = MonthTs::new();
        series.set_period(
            TimePosition::from_ym(2000, 1).unwrap(),
            TimePosition::from_ym(2000, 12).unwrap(),
        );
        let descriptor = series.descriptor_mut();
        let mut ident = TsIdent::new("SHA", "CDEC", "Storage", "Month");
        ident.alias = "Shasta".to_string();
        descriptor.set_ident(ident);
        descriptor.set_units("AF");
        descriptor.set_description("Lake Shasta storage");

        let legend = series.descriptor().format_legend("%A (%L, %T) [%U] %p");
        assert_eq!(legend, "Shasta (SHA, Storage) [AF] 2000-01 - 2000-12");
        assert_eq!(
            series.descriptor().format_legend("%F: %D, %b x%m"),
            "SHA.CDEC.Storage.Month: Lake Shasta storage, Month x1"
        );
    }

    #[test]
    fn test_format_legend_passes_unknown_tokens() {
        let series = MonthTs::new();
        assert_eq!(series.descriptor().format_legend("100%% %q %"), "100% %q %");
    }
}

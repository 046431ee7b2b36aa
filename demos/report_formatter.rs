use blockdiff::{ReportFormatter, create_report_from_str};

fn main() {
    let original = "\
Fourth Ideal
Kaladin
Teft
Rock
Sigzil
";
    let modified = "\
Fourth ideal
Teft
Rock
Sigzil
Kaladin
Lopen
Skar
";

    let report = create_report_from_str(original, modified).unwrap();
    let f = ReportFormatter::new().with_color();
    print!("{}", f.fmt_report(&report));
}

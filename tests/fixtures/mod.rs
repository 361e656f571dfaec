//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use fantasy_stats::types::Attributes;
use fantasy_stats::{PlayerCollection, PlayerRecord, RecordSchema};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Early-season export, names carrying the source's leading artifact
pub const NOVEMBER_CSV: &str = "\
Name,Team,Pos,GP,G,A,Pts,PPG,PPA,SOG,Hits,PIM
\u{feff}Connor McDavid,EDM,C,20,8,18,26,2,7,61,10,6
\u{feff}Sidney Crosby,PIT,C,13,12,5,17,4,1,52,8,4
\u{feff}Patrik Laine,WPG,RW,20,12,6,18,4,2,58,12,8
\u{feff}Brent Burns,SJS,D,20,6,9,15,2,3,88,14,12
\u{feff}Tom Wilson,WSH,RW,18,1,3,4,0,0,24,66,40
\u{feff}Backup Goalie,ANA,G,2,0,0,0,0,0,0,0,0
";

/// Mid-season export of the same league
pub const JANUARY_CSV: &str = "\
Name,Team,Pos,GP,G,A,Pts,PPG,PPA,SOG,Hits,PIM
\u{feff}Connor McDavid,EDM,C,44,19,35,54,4,13,132,22,16
\u{feff}Sidney Crosby,PIT,C,34,26,15,41,8,4,118,20,10
\u{feff}Patrik Laine,WPG,RW,42,23,14,37,7,4,126,24,16
\u{feff}Brent Burns,SJS,D,44,17,25,42,5,9,186,30,26
\u{feff}Tom Wilson,WSH,RW,41,3,6,9,0,0,52,148,90
\u{feff}Auston Matthews,TOR,C,41,21,13,34,5,2,139,22,4
";

pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be creatable");
    file.write_all(contents.as_bytes())
        .expect("temp file should be writable");
    file
}

/// Collection of `(name, games played, goals)` rows under the default schema
pub fn goals_collection(rows: &[(&str, f64, f64)]) -> PlayerCollection {
    let schema = Arc::new(RecordSchema::default());
    let mut collection = PlayerCollection::with_schema(schema.clone());
    for (name, gp, goals) in rows {
        let attributes = Attributes::from([
            ("Name".to_string(), format!("x{name}")),
            ("GP".to_string(), gp.to_string()),
            ("G".to_string(), goals.to_string()),
        ]);
        collection
            .add(PlayerRecord::new(attributes, schema.clone()))
            .expect("fixture rows have names");
    }
    collection
}

//! Puzzle inputs and expected answers read from a local directory

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-based store for puzzle inputs
///
/// Directory structure:
/// - `{base_dir}/{year}/day{DD}.txt` (real input)
/// - `{base_dir}/{year}/day{DD}_example.txt` (example input)
/// - `{base_dir}/{year}/day{DD}[_example]_part{P}.answer` (expected answers)
pub struct InputStore {
    base_dir: PathBuf,
    example: bool,
}

impl InputStore {
    pub fn new(base_dir: PathBuf, example: bool) -> Self {
        Self { base_dir, example }
    }

    fn stem(&self, day: u8) -> String {
        if self.example {
            format!("day{:02}_example", day)
        } else {
            format!("day{:02}", day)
        }
    }

    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.base_dir
            .join(year.to_string())
            .join(format!("{}.txt", self.stem(day)))
    }

    pub fn answer_path(&self, year: u16, day: u8, part: u8) -> PathBuf {
        self.base_dir
            .join(year.to_string())
            .join(format!("{}_part{}.answer", self.stem(day), part))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).exists()
    }

    pub fn read_input(&self, year: u16, day: u8) -> Result<String, InputError> {
        read_optional(&self.input_path(year, day))?
            .ok_or_else(|| InputError::NotFound(self.input_path(year, day)))
    }

    /// Expected answer for a part, trimmed. `None` when no answer file exists.
    pub fn expected_answer(&self, year: u16, day: u8, part: u8) -> Result<Option<String>, InputError> {
        Ok(read_optional(&self.answer_path(year, day, part))?
            .map(|answer| answer.trim().to_string()))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, InputError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(InputError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_path_layout() {
        let real = InputStore::new(PathBuf::from("inputs"), false);
        assert_eq!(real.input_path(2025, 1), PathBuf::from("inputs/2025/day01.txt"));
        assert_eq!(
            real.answer_path(2025, 12, 1),
            PathBuf::from("inputs/2025/day12_part1.answer")
        );

        let example = InputStore::new(PathBuf::from("inputs"), true);
        assert_eq!(
            example.input_path(2025, 12),
            PathBuf::from("inputs/2025/day12_example.txt")
        );
        assert_eq!(
            example.answer_path(2025, 12, 2),
            PathBuf::from("inputs/2025/day12_example_part2.answer")
        );
    }

    #[test]
    fn test_read_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), false);

        assert!(!store.contains(2025, 12));
        assert!(matches!(
            store.read_input(2025, 12),
            Err(InputError::NotFound(_))
        ));

        write(&temp, "2025/day12.txt", "0:\n#\n\n1x1: 1\n");
        assert!(store.contains(2025, 12));
        assert_eq!(store.read_input(2025, 12).unwrap(), "0:\n#\n\n1x1: 1\n");
    }

    #[test]
    fn test_expected_answer_is_trimmed_and_optional() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), true);

        assert_eq!(store.expected_answer(2025, 12, 1).unwrap(), None);

        write(&temp, "2025/day12_example_part1.answer", "2\n");
        assert_eq!(store.expected_answer(2025, 12, 1).unwrap(), Some("2".to_string()));
        // Real-input answers are separate files
        let real = InputStore::new(temp.path().to_path_buf(), false);
        assert_eq!(real.expected_answer(2025, 12, 1).unwrap(), None);
    }

    #[test]
    fn test_directory_in_place_of_file_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("2025/day12.txt")).unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), false);
        assert!(matches!(
            store.read_input(2025, 12),
            Err(InputError::Io { .. })
        ));
    }
}

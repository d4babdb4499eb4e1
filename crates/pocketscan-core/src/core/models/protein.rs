use super::atom::AtomRecord;
use nalgebra::Point3;

/// The ordered heavy-atom list of a single structure.
///
/// A `Protein` is the read-only input of every pipeline invocation. It may be empty;
/// emptiness is reported by the detection workflow rather than rejected here, so that
/// callers can map "nothing parsed" and "nothing found" to the same outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Protein {
    atoms: Vec<AtomRecord>,
}

impl Protein {
    pub fn new(atoms: Vec<AtomRecord>) -> Self {
        Self { atoms }
    }

    pub fn atoms(&self) -> &[AtomRecord] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AtomRecord> {
        self.atoms.iter()
    }

    /// Collects the atom coordinates in atom order.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|atom| *atom.position()).collect()
    }
}

impl From<Vec<AtomRecord>> for Protein {
    fn from(atoms: Vec<AtomRecord>) -> Self {
        Self::new(atoms)
    }
}

impl FromIterator<AtomRecord> for Protein {
    fn from_iter<I: IntoIterator<Item = AtomRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Protein {
    type Item = &'a AtomRecord;
    type IntoIter = std::slice::Iter<'a, AtomRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(residue_number: isize, x: f64) -> AtomRecord {
        AtomRecord::new("A", residue_number, "ALA", "CA", "C", Point3::new(x, 0.0, 0.0)).unwrap()
    }

    #[test]
    fn default_protein_is_empty() {
        let protein = Protein::default();
        assert!(protein.is_empty());
        assert_eq!(protein.len(), 0);
        assert!(protein.positions().is_empty());
    }

    #[test]
    fn positions_preserve_atom_order() {
        let protein = Protein::new(vec![atom(1, 3.0), atom(2, -1.0), atom(3, 0.5)]);
        assert_eq!(
            protein.positions(),
            vec![
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(-1.0, 0.0, 0.0),
                Point3::new(0.5, 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn protein_can_be_collected_from_an_iterator() {
        let protein: Protein = (1..=4).map(|i| atom(i, i as f64)).collect();
        assert_eq!(protein.len(), 4);
        let numbers: Vec<isize> = protein.iter().map(|a| a.residue_number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }
}

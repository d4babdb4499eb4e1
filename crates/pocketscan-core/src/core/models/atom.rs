use nalgebra::Point3;
use thiserror::Error;

/// Errors raised when a record is constructed from incomplete or invalid fields.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ModelError {
    #[error("Required field '{0}' is empty")]
    EmptyField(&'static str),
    #[error("Atom '{atom_name}' of residue {residue_number} has a non-finite coordinate")]
    NonFiniteCoordinate {
        atom_name: String,
        residue_number: isize,
    },
}

/// A heavy-atom record produced by the structure-acquisition collaborator.
///
/// Records are immutable once built: all fields are private and validated in
/// [`AtomRecord::new`], so downstream stages never see empty identifiers or
/// non-finite coordinates. Hydrogens are expected to be filtered out before
/// records are created.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    chain_id: String,
    residue_number: isize,
    residue_name: String,
    atom_name: String,
    element: String,
    position: Point3<f64>,
}

impl AtomRecord {
    /// Creates a validated atom record.
    ///
    /// Residue, atom and element names are trimmed; the element symbol is stored
    /// upper-cased. The chain identifier is kept verbatim (it may legitimately be blank
    /// in PDB files).
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The chain identifier of the parent residue.
    /// * `residue_number` - The residue sequence number from the source file.
    /// * `residue_name` - The three-letter residue name (e.g. "LEU").
    /// * `atom_name` - The atom name (e.g. "CA").
    /// * `element` - The element symbol (e.g. "C").
    /// * `position` - The Cartesian coordinate in Angstroms.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyField`] if a name is blank and
    /// [`ModelError::NonFiniteCoordinate`] if any coordinate is NaN or infinite.
    pub fn new(
        chain_id: impl Into<String>,
        residue_number: isize,
        residue_name: &str,
        atom_name: &str,
        element: &str,
        position: Point3<f64>,
    ) -> Result<Self, ModelError> {
        let residue_name = residue_name.trim();
        let atom_name = atom_name.trim();
        let element = element.trim();

        if residue_name.is_empty() {
            return Err(ModelError::EmptyField("residue_name"));
        }
        if atom_name.is_empty() {
            return Err(ModelError::EmptyField("atom_name"));
        }
        if element.is_empty() {
            return Err(ModelError::EmptyField("element"));
        }
        if !position.iter().all(|c| c.is_finite()) {
            return Err(ModelError::NonFiniteCoordinate {
                atom_name: atom_name.to_string(),
                residue_number,
            });
        }

        Ok(Self {
            chain_id: chain_id.into(),
            residue_number,
            residue_name: residue_name.to_string(),
            atom_name: atom_name.to_string(),
            element: element.to_ascii_uppercase(),
            position,
        })
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn residue_number(&self) -> isize {
        self.residue_number
    }

    pub fn residue_name(&self) -> &str {
        &self.residue_name
    }

    pub fn atom_name(&self) -> &str {
        &self.atom_name
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    /// Returns the (chain, residue number, residue name) triple identifying the parent
    /// residue.
    pub fn residue_key(&self) -> (&str, isize, &str) {
        (&self.chain_id, self.residue_number, &self.residue_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_trims_and_normalizes_fields() {
        let atom = AtomRecord::new("A", 42, " LEU ", " CD1", "c ", Point3::new(1.0, 2.0, 3.0))
            .unwrap();

        assert_eq!(atom.chain_id(), "A");
        assert_eq!(atom.residue_number(), 42);
        assert_eq!(atom.residue_name(), "LEU");
        assert_eq!(atom.atom_name(), "CD1");
        assert_eq!(atom.element(), "C");
        assert_eq!(atom.position(), &Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.residue_key(), ("A", 42, "LEU"));
    }

    #[test]
    fn blank_chain_identifier_is_accepted() {
        let atom = AtomRecord::new(" ", 1, "GLY", "CA", "C", Point3::origin()).unwrap();
        assert_eq!(atom.chain_id(), " ");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert_eq!(
            AtomRecord::new("A", 1, "  ", "CA", "C", Point3::origin()),
            Err(ModelError::EmptyField("residue_name"))
        );
        assert_eq!(
            AtomRecord::new("A", 1, "GLY", "", "C", Point3::origin()),
            Err(ModelError::EmptyField("atom_name"))
        );
        assert_eq!(
            AtomRecord::new("A", 1, "GLY", "CA", " ", Point3::origin()),
            Err(ModelError::EmptyField("element"))
        );
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let result = AtomRecord::new("A", 7, "SER", "OG", "O", Point3::new(0.0, f64::NAN, 0.0));
        assert_eq!(
            result,
            Err(ModelError::NonFiniteCoordinate {
                atom_name: "OG".to_string(),
                residue_number: 7,
            })
        );

        let position = Point3::new(f64::INFINITY, 0.0, 0.0);
        let result = AtomRecord::new("A", 7, "SER", "OG", "O", position);
        assert!(matches!(result, Err(ModelError::NonFiniteCoordinate { .. })));
    }
}

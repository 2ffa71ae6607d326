use super::enrollment::Enrollment;
use super::payment::Payment;
use serde::{Deserialize, Serialize};

pub type FamilyId = u32;
pub type StudentId = u32;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Student {
    pub id: StudentId,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
}

impl Student {
    pub fn new(id: StudentId, enrollments: Vec<Enrollment>) -> Self {
        Self { id, enrollments }
    }
}

/// Billing aggregate: the students whose enrollments are charged and the
/// payments made for all of them. Payments are not attributed per student.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Family {
    pub id: FamilyId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Family {
    pub fn new(id: FamilyId) -> Self {
        Self {
            id,
            name: None,
            students: Vec::new(),
            payments: Vec::new(),
        }
    }

    pub fn with_students(mut self, students: Vec<Student>) -> Self {
        self.students = students;
        self
    }

    pub fn with_payments(mut self, payments: Vec<Payment>) -> Self {
        self.payments = payments;
        self
    }
}

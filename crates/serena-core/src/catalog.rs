//! # Static Catalog
//!
//! The course syllabi and client testimonials served by the public read
//! endpoints. This content is compiled in rather than stored: it changes
//! with a release, not at runtime.

use serde::Serialize;
use utoipa::ToSchema;

use crate::service::ServiceType;

/// One week of a course syllabus.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseWeek {
    pub week: u32,
    pub title: &'static str,
    pub content: &'static str,
}

/// A published course with its full syllabus.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Course {
    pub id: &'static str,
    pub title: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
    pub price: u32,
    pub currency: &'static str,
    pub weeks: Vec<CourseWeek>,
}

/// The course listing view: everything but the syllabus.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
    pub price: u32,
    pub currency: &'static str,
}

impl Course {
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            id: self.id,
            title: self.title,
            duration: self.duration,
            description: self.description,
            price: self.price,
            currency: self.currency,
        }
    }
}

/// A client testimonial, tied to the service it reviews.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Testimonial {
    pub id: u32,
    pub name: &'static str,
    pub image: &'static str,
    pub text: &'static str,
    pub rating: u8,
    pub service: ServiceType,
}

/// The compiled-in content set.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub courses: Vec<Course>,
    pub testimonials: Vec<Testimonial>,
}

impl Catalog {
    pub fn find_course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn find_testimonial(&self, id: u32) -> Option<&Testimonial> {
        self.testimonials.iter().find(|t| t.id == id)
    }

    pub fn testimonials_for(&self, service: ServiceType) -> Vec<&Testimonial> {
        self.testimonials
            .iter()
            .filter(|t| t.service == service)
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            courses: courses(),
            testimonials: testimonials(),
        }
    }
}

fn week(week: u32, title: &'static str, content: &'static str) -> CourseWeek {
    CourseWeek { week, title, content }
}

fn courses() -> Vec<Course> {
    vec![
        Course {
            id: "mindfulness-4-semanas",
            title: "Curso de mindfulness para reducir el estrés y la ansiedad",
            duration: "4 semanas",
            description: "Curso diseñado para aprender mindfulness y gestión emocional en 4 semanas intensivas.",
            price: 150,
            currency: "USD",
            weeks: vec![
                week(1, "¿Qué es mindfulness? ¿Cómo puedo utilizarlo para nuestra gestión emocional?", "Entrenamiento de atención plena al momento presente."),
                week(2, "Beneficios de Mindfulness (atención plena) para el cambio de creencias limitantes", "Entrenamiento de atención plena al entorno presente."),
                week(3, "Relaciones conscientes, límites saludables, autoestima y empatía.", "Entrenamiento en atención plena a nuestro espacio y el ajeno."),
                week(4, "Cómo entender el estrés, la ansiedad y utilizarlos a nuestro favor.", "Entrenamiento para entrar en estado de relajación"),
            ],
        },
        Course {
            id: "mindfulness-8-semanas",
            title: "Curso de mindfulness para el manejo emocional",
            duration: "8 semanas",
            description: "Curso completo de mindfulness y gestión emocional en 8 semanas.",
            price: 280,
            currency: "USD",
            weeks: vec![
                week(1, "Mindfulness - Gestión Emocional.", ""),
                week(2, "Primeros pasos en la atención plena - Fortalezas emocionales", ""),
                week(3, "Crear consciencia de relaciones automáticas", ""),
                week(4, "Relaciones conscientes I", ""),
                week(5, "Relaciones conscientes II.", ""),
                week(6, "Empatía y espacio personal sano.", ""),
                week(7, "Comunicación saludable.", ""),
                week(8, "Cambia el foco, potenciando tus creencias.", ""),
            ],
        },
        Course {
            id: "instructorado-mindfulness",
            title: "Instructorado mindfulness y gestión emocional",
            duration: "12 semanas",
            description: "Formación completa para convertirse en instructor de mindfulness y gestión emocional.",
            price: 450,
            currency: "USD",
            weeks: vec![
                week(1, "Mindfulness - Gestión Emocional.", ""),
                week(2, "Energía de las emociones.", ""),
                week(3, "Crear consciencia de relaciones automáticas", ""),
                week(4, "Relaciones conscientes I", ""),
                week(5, "Relaciones conscientes II.", ""),
                week(6, "Empatía y espacio personal sano.", ""),
                week(7, "Comunicación. Manifestación.", ""),
                week(8, "Comunicación. Manifestación.", ""),
                week(9, "Cambia el foco, potenciando tus creencias.", ""),
                week(10, "Apreciación de la belleza, curiosidad, vitalidad, perdón.", ""),
                week(11, "Aceptación, universalismo, gratitud, armonía, compasión.", ""),
                week(12, "Manejo del estrés, estado flow.", ""),
            ],
        },
    ]
}

fn testimonials() -> Vec<Testimonial> {
    fn t(
        id: u32,
        name: &'static str,
        image: &'static str,
        text: &'static str,
        service: ServiceType,
    ) -> Testimonial {
        Testimonial {
            id,
            name,
            image,
            text,
            rating: 5,
            service,
        }
    }

    vec![
        t(1, "Euge", "/assets/img/testimonials/testimonials-1.jpg",
          "Los masajes trascienden la piel y llegan al alma, con ella viví una experiencia única, la recomiendo al 100%. Muy buena dedicación, una energía especial, quede encantada, muy profesional pero sobre todo humana, cálida y positiva.",
          ServiceType::MasajeTuiNa),
        t(2, "Pati", "/assets/img/testimonials/testimonials-2.jpg",
          "Luego de las preguntas que me hizo tome la decisión que buscaba y me siento feliz! Lo que me dijo me sirvió para soltar y animarme. Su impulso fue justo lo que necesitaba",
          ServiceType::CoachOntologico),
        t(3, "Patricio", "/assets/img/testimonials/testimonials-3.jpg",
          "Lo más destacable ha sido mi nueva capacidad de observarme ... me siento feliz de estar haciéndolo, pues parece que me hubiese dividido en dos personas, una es bastante emocional y apresurada en sacar conclusiones y la otra, la que apareció ahora, es reflexiva, más despegada y bastante más madura.",
          ServiceType::MindfulnessIndividual),
        t(4, "María", "/assets/img/testimonials/testimonials-4.jpg",
          "La terapia con Sere fue algo que yo buscaba hace mucho! Encontrarme conmigo misma! Ella me enseño a manejar mi energía, a entenderme, a ver las cosas de una manera diferente. Para mi, fue un antes y un después. Todo lo lindo que ella es te lo transmite! De cada Sesión salía renovada y con mucha paz",
          ServiceType::MindfulnessIndividual),
        t(5, "Stefi", "/assets/img/testimonials/testimonials-5.jpg",
          "Me siento super bien, siento que cosas muy buenas me están pasando a nivel del estudio y en mis relaciones. Compañeros y profesores me hacen devoluciones muy lindas y siento que todo está funcionando. Me siento como un imán de buena suerte, que pasan cosas preciosas.",
          ServiceType::CoachOntologico),
        t(6, "Gabi", "/assets/img/testimonials/testimonials-6.jpg",
          "Me di cuenta que no debemos adelantarnos a los acontecimientos, ni afligirnos por cosas que no podemos cambiar. Que no todos reaccionamos de igual manera frente a una misma situación y que cada uno tendrá sus razones para hacerlo.",
          ServiceType::MindfulnessIndividual),
        t(7, "Dani", "/assets/img/testimonials/testimonials-7.jpg",
          "Excelente profesional y persona. La primera vez que alguien me puede aliviar realmente la tensión física y mental. El mejor momento de mi semana era ir a consulta. Busca la excelencia y lo logra, estudiándote y empatizando para un tratamiento único que realmente cambia tu vida.",
          ServiceType::MedicinaCuantica),
        t(8, "Anto", "/assets/img/testimonials/testimonials-8.jpg",
          "Encontré un estado de equilibrio energético y emocional gracias a mis encuentros con Sere. 100% recomendable.",
          ServiceType::Reiki),
        t(9, "Pao", "/assets/img/testimonials/testimonials-9.jpg",
          "Excelente atención. Una maravillosa experiencia que Sere formara parte de mi proceso personal. Brinda herramientas para continuar trabajando y su labor tiene una faseta humana increíble. Realmente recomiendo sus terapias.",
          ServiceType::MindfulnessIndividual),
        t(10, "Romi", "/assets/img/testimonials/testimonials-10.jpg",
          "Tuve una excelente experiencia, la cual me aportó mucho conocimiento y ayuda. La Coach es increíble, hace todo con mucho amor. Súper recomiendo.",
          ServiceType::CoachOntologico),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_carries_three_courses_and_ten_testimonials() {
        let catalog = Catalog::default();
        assert_eq!(catalog.courses.len(), 3);
        assert_eq!(catalog.testimonials.len(), 10);
    }

    #[test]
    fn course_ids_are_distinct_and_findable() {
        let catalog = Catalog::default();
        for course in &catalog.courses {
            assert_eq!(catalog.find_course(course.id).unwrap().id, course.id);
        }
        assert!(catalog.find_course("mindfulness-16-semanas").is_none());
    }

    #[test]
    fn syllabus_weeks_are_sequential() {
        let catalog = Catalog::default();
        for course in &catalog.courses {
            for (i, week) in course.weeks.iter().enumerate() {
                assert_eq!(week.week as usize, i + 1, "{}", course.id);
            }
        }
        assert_eq!(catalog.find_course("instructorado-mindfulness").unwrap().weeks.len(), 12);
    }

    #[test]
    fn summary_omits_the_syllabus() {
        let catalog = Catalog::default();
        let summary = catalog.courses[0].summary();
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("weeks").is_none());
        assert_eq!(value["price"], 150);
    }

    #[test]
    fn testimonials_filter_by_service() {
        let catalog = Catalog::default();
        let coaching = catalog.testimonials_for(ServiceType::CoachOntologico);
        assert_eq!(coaching.len(), 3);
        assert!(catalog.testimonials_for(ServiceType::CirugiaAstral).is_empty());
    }

    #[test]
    fn testimonial_lookup_by_numeric_id() {
        let catalog = Catalog::default();
        assert_eq!(catalog.find_testimonial(8).unwrap().service, ServiceType::Reiki);
        assert!(catalog.find_testimonial(11).is_none());
    }
}

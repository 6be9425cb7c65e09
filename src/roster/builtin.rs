//! Roster table shipped with the service

/// `(id, number, name, designation)`
pub(super) const EMPLOYEES: &[(u32, u32, &str, &str)] = &[
    (1, 1, "Jitendra Nikhade", "Office Superintendent"),
    (2, 2, "Surekha Pande", "Office Superintendent"),
    (3, 3, "Dattatray Raut", "Office Superintendent"),
    (4, 4, "Kalpana Chandele", "Assistant Superintendent"),
    (5, 5, "Nilesh Shekar", "Legal Advisor"),
    (6, 6, "Pawan Kulthe", "Assistant Superintendent"),
    (7, 7, "Nitin Ambade", "Assistant Superintendent"),
    (8, 8, "Kiran Supe", "Assistant Superintendent"),
    (9, 9, "Hemant Kadnake", "Assistant Superintendent"),
    (10, 10, "Naresh Nikhare", "Assistant Superintendent"),
    (11, 11, "Madhuri Nimkar", "Assistant Superintendent"),
    (12, 12, "Kishor Eknar", "Assistant Superintendent"),
    (13, 13, "Bhagwan Chandrawanshi", "Assistant Superintendent"),
    (14, 14, "Abhijeet Tekam", "Higher-Grade Stenographer"),
    (16, 16, "Prakash Bonde", "Senior Clerk"),
    (17, 17, "Rushikesh Pullarwar", "Senior Clerk"),
    (18, 18, "Priya Lekurwale", "Senior Clerk"),
    (19, 19, "Dipak Dafade", "Senior Clerk"),
    (20, 20, "Shalini Kasare", "Senior Clerk"),
    (21, 21, "Samir Kahile", "Senior Clerk"),
    (22, 22, "Sachin Meshram", "Senior Clerk"),
    (23, 23, "Chandrakant Kubade", "Senior Clerk"),
    (24, 24, "Kavita Patil", "Senior Clerk"),
    (25, 25, "Nayankumar Hargule", "Senior Clerk"),
    (26, 26, "Parmeshwar Ambore", "Senior Clerk"),
    (27, 27, "Nitish Halde", "Junior Clerk"),
    (28, 28, "Ajay Mahadole", "Junior Clerk"),
    (29, 29, "Mohan Nagpure", "Junior Clerk"),
    (30, 30, "Paritosh Shukla", "Junior Clerk"),
    (31, 31, "Antariksh Kumbhare", "Junior Clerk"),
    (32, 32, "Shweta Lokhande", "Junior Clerk"),
    (33, 33, "Bharat Nimaje", "Junior Clerk"),
    (34, 34, "Chandrashekhar Ukey", "Pharmacy Officer"),
    (35, 35, "Navkiran Kshiraskar", "Pharmacy Officer"),
    (36, 36, "Prasanna Waradpande", "Telephone Operator"),
    (37, 37, "Vijay Dhage", "Bio-medical Engg."),
    (38, 38, "Manoj Shriwastav", "Technician"),
    (39, 39, "Vilash Kedar", "Technician"),
    (40, 40, "Gauri Zade", "Technician"),
    (41, 41, "Santosh Ghatol", "Technician"),
    (42, 42, "Hemant Bendale", "Technician"),
    (43, 43, "Shubham Pajgade", "Unskill Artizen"),
    (44, 44, "Vikas Nandurkar", "Unskill Artizen"),
    (45, 45, "Najim Patel", "Junior Technical Assistant"),
    (46, 46, "Rahul Harinkhede", "Statistical Assistant"),
    (47, 47, "Suraj Phule", "Statistical Investigator"),
    (48, 48, "Prakash Tembhurne", "Health Inspector"),
    (49, 49, "Sanjay Malwe", "Health Inspector"),
    (50, 50, "Pradeep Wagh", "Health Inspector"),
    (51, 51, "Madhukar Tikhe", "Health Inspector"),
    (52, 52, "Suraj Dhone", "Pharmacy Officer"),
    (53, 53, "Sandeep Wadibhasme", "Pharmacy Officer"),
    (74, 74, "Vilas Shette", "Junior Clerk"),
];
